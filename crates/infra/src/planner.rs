//! Planning session orchestration.
//!
//! `Planner` composes the scheduling engine with a blob store and a message bus:
//!
//! ```text
//! PlanCommand
//!   ↓
//! 1. Engine runs the command to completion (pure, returns a Mutation)
//!   ↓
//! 2. Each event is wrapped in an envelope (id, sequence number, timestamp)
//!   ↓
//! 3. Envelopes are published, followed by a redraw request when the mutation asks for one
//! ```
//!
//! Saving is a separate, explicit step (`save_plan` / `save_cycles`).

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use vulcplan_events::{Event, EventBus, EventEnvelope, Subscription};
use vulcplan_planning::{
    CyclewiseView, Mutation, PlanCommand, ProductionLedger, SchedulingEngine, SchedulingEvent,
};

use crate::config::PlannerConfig;
use crate::repository::PlanRepository;
use crate::seed::demo_vulcanizers;
use crate::store::{BlobStore, StoreError};

/// Message published on the planner's bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerMessage {
    Event(EventEnvelope<SchedulingEvent>),
    /// State changed; anything showing it should repaint. `revision` increases per redraw.
    Redraw { revision: u64 },
}

impl PlannerMessage {
    pub fn wants_redraw(&self) -> bool {
        matches!(self, PlannerMessage::Redraw { .. })
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The mutation was applied in memory but its notification could not be published.
    #[error("publish failed: {0}")]
    Publish(String),
}

#[derive(Debug)]
pub struct Planner<S, B> {
    engine: SchedulingEngine,
    repository: PlanRepository<S>,
    bus: B,
    sequence: u64,
    revision: u64,
}

impl<S, B> Planner<S, B>
where
    S: BlobStore,
    B: EventBus<PlannerMessage>,
{
    /// Read persisted state, falling back to config defaults and (optionally) the demo seed.
    pub fn load(store: S, bus: B, config: &PlannerConfig) -> Result<Self, StoreError> {
        let repository = PlanRepository::new(store);

        let vulcanizers = match repository.load_vulcanizers()? {
            Some(vulcanizers) => vulcanizers,
            None if config.seed_demo_data => {
                tracing::info!("no saved vulcanizers; seeding demo data");
                demo_vulcanizers()
            }
            None => Vec::new(),
        };
        let production = repository.load_production()?.unwrap_or_default();
        let min_cycles_required = repository
            .load_min_cycles()?
            .unwrap_or(config.min_cycles_required);

        tracing::info!(
            vulcanizers = vulcanizers.len(),
            min_cycles_required,
            "loaded planning state"
        );

        Ok(Self::new(
            SchedulingEngine::new(vulcanizers, production, min_cycles_required),
            repository,
            bus,
        ))
    }

    pub fn new(engine: SchedulingEngine, repository: PlanRepository<S>, bus: B) -> Self {
        Self {
            engine,
            repository,
            bus,
            sequence: 0,
            revision: 0,
        }
    }

    pub fn engine(&self) -> &SchedulingEngine {
        &self.engine
    }

    pub fn repository(&self) -> &PlanRepository<S> {
        &self.repository
    }

    pub fn subscribe(&self) -> Subscription<PlannerMessage> {
        self.bus.subscribe()
    }

    pub fn cyclewise_view(&self) -> Option<CyclewiseView> {
        CyclewiseView::of_active(&self.engine)
    }

    /// Run one command and publish what happened.
    ///
    /// The mutation is returned even when nothing changed (rejections, not-found no-ops);
    /// inspect its notices.
    pub fn dispatch(&mut self, command: PlanCommand) -> Result<Mutation, DispatchError> {
        let name = command.name();
        let mutation = self.engine.handle(command);

        if let Some(err) = mutation.rejection() {
            tracing::warn!(command = name, error = %err, "command rejected");
        } else {
            tracing::info!(command = name, events = mutation.events.len(), "command applied");
        }

        let occurred_at = Utc::now();
        for event in &mutation.events {
            self.sequence += 1;
            let envelope = EventEnvelope::new(
                Uuid::now_v7(),
                event.event_type(),
                self.sequence,
                occurred_at,
                event.clone(),
            );
            self.publish(PlannerMessage::Event(envelope))?;
        }

        if mutation.redraw {
            self.revision += 1;
            self.publish(PlannerMessage::Redraw {
                revision: self.revision,
            })?;
        }

        Ok(mutation)
    }

    /// Persist the vulcanizer tree and the minimum-cycles setting.
    pub fn save_plan(&self) -> Result<(), StoreError> {
        self.repository
            .save_vulcanizers(self.engine.vulcanizers())?;
        self.repository
            .save_min_cycles(self.engine.min_cycles_required())?;
        tracing::info!(
            vulcanizers = self.engine.vulcanizers().len(),
            "saved plan"
        );
        Ok(())
    }

    /// Persist the production ledger.
    pub fn save_cycles(&self) -> Result<(), StoreError> {
        let ledger: &ProductionLedger = self.engine.production();
        self.repository.save_production(ledger)?;
        tracing::info!("saved production cycles");
        Ok(())
    }

    fn publish(&self, message: PlannerMessage) -> Result<(), DispatchError> {
        self.bus
            .publish(message)
            .map_err(|e| DispatchError::Publish(format!("{e:?}")))
    }
}
