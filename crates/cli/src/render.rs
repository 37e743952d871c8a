//! Terminal output.

use vulcplan_planning::{CycleParity, CyclewiseView, Notice};

pub fn notices(notices: &[Notice]) {
    for notice in notices {
        if notice.is_warning() {
            eprintln!("! {notice}");
        } else {
            println!("{notice}");
        }
    }
}

pub fn view(view: Option<&CyclewiseView>, json: bool) -> anyhow::Result<()> {
    let Some(view) = view else {
        println!("No vulcanizer selected.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!("{} ({} cycles)", view.vulc_no, view.cycles);
    if view.rows.is_empty() {
        println!("  no parts");
        return Ok(());
    }

    let mut header = format!("  {:<12} {:>7}", "part", "stock");
    for cycle_index in 0..view.cycles as usize {
        let parity = &CycleParity::of_index(cycle_index).as_str()[..1];
        header.push_str(&format!(" {:>5}", format!("{}{parity}", cycle_index + 1)));
    }
    println!("{header}");

    for row in &view.rows {
        let flag = if row.low_stock { "*" } else { " " };
        let mut line = format!("{flag} {:<12} {:>7}", row.part_no, row.total_stock);
        for cell in &row.cells {
            line.push_str(&format!(" {:>5}", cell.value));
        }
        println!("{line}");
        if !row.lot_nos.is_empty() {
            println!(
                "    lots {}  bins {}",
                row.lot_nos.join(","),
                row.bin_nos.join(",")
            );
        }
    }
    Ok(())
}
