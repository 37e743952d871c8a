//! Demo dataset used when nothing has been saved yet.

use vulcplan_core::VulcanizerId;
use vulcplan_inventory::{Bin, BinLedger};
use vulcplan_planning::{Part, Vulcanizer};

pub fn demo_vulcanizers() -> Vec<Vulcanizer> {
    vec![
        Vulcanizer::new(VulcanizerId::new(1), "V-1", 10).with_parts(vec![
            Part::seeded(
                "P101",
                BinLedger::new(vec![
                    Bin::new("L101", "B101", 100),
                    Bin::new("L102", "B102", 50),
                ]),
                10,
                12,
            ),
            Part::seeded(
                "P102",
                BinLedger::new(vec![Bin::new("L103", "B103", 80)]),
                8,
                15,
            ),
        ]),
        Vulcanizer::new(VulcanizerId::new(2), "V-2", 8).with_parts(vec![Part::seeded(
            "P103",
            BinLedger::new(vec![Bin::new("L104", "B104", 150)]),
            12,
            10,
        )]),
        Vulcanizer::new(VulcanizerId::new(3), "V-3", 15),
    ]
}
