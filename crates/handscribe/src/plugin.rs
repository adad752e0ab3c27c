use crate::{AppError, AppResult, Surface, SurfaceKind, SurfaceStatus, config::Config};

use handscribe_core::{GatePhase, RecordingGate, Scheduler, TimerSettings};

use std::{collections::BTreeMap, panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Plugin lifetime: owns the recording gate and every open surface.
///
/// The gate is created on load and injected into each surface; unload
/// closes the surfaces before shutting the gate down.
pub struct Plugin {
    gate: Arc<RecordingGate>,
    scheduler: Arc<dyn Scheduler>,
    settings: TimerSettings,
    surfaces: BTreeMap<SurfaceKind, Surface>,
    unloaded: bool,
}

impl Plugin {
    /// Create the gate and open the surfaces configured to open on load.
    ///
    /// # Errors
    ///
    /// Returns error if the timer configuration is invalid.
    #[track_caller]
    #[instrument(skip(config, scheduler))]
    pub fn load(config: &Config, scheduler: Arc<dyn Scheduler>) -> AppResult<Self> {
        let settings = config.timer.settings()?;

        let mut plugin = Self {
            gate: Arc::new(RecordingGate::new()),
            scheduler,
            settings,
            surfaces: BTreeMap::new(),
            unloaded: false,
        };

        for kind in &config.behaviour.open_on_load {
            plugin.open_surface(*kind);
        }

        info!(
            surfaces = plugin.surfaces.len(),
            tick_interval_ms = settings.tick_interval().as_millis(),
            "Plugin loaded"
        );

        Ok(plugin)
    }

    /// The shared recording gate.
    pub fn gate(&self) -> &Arc<RecordingGate> {
        &self.gate
    }

    /// An open surface.
    pub fn surface(&self, kind: SurfaceKind) -> Option<&Surface> {
        self.surfaces.get(&kind)
    }

    /// Open `kind` unless it is already open. Returns whether it was opened.
    pub fn open_surface(&mut self, kind: SurfaceKind) -> bool {
        if self.surfaces.contains_key(&kind) {
            debug!(surface = %kind, "Surface already open");
            return false;
        }

        let surface = Surface::open(
            kind,
            Arc::clone(&self.gate),
            Arc::clone(&self.scheduler),
            self.settings,
        );
        self.surfaces.insert(kind, surface);
        true
    }

    /// Close `kind`, stopping its recording first.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceNotOpen` if the surface is not open.
    #[track_caller]
    pub fn close_surface(&mut self, kind: SurfaceKind) -> AppResult<()> {
        let mut surface = self.surfaces.remove(&kind).ok_or(AppError::SurfaceNotOpen {
            surface: kind,
            location: ErrorLocation::from(Location::caller()),
        })?;
        surface.close();
        Ok(())
    }

    /// Press the record button of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceNotOpen` if the surface is not open.
    #[track_caller]
    pub fn toggle_recording(&mut self, kind: SurfaceKind) -> AppResult<SurfaceStatus> {
        let surface = self.surfaces.get(&kind).ok_or(AppError::SurfaceNotOpen {
            surface: kind,
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(surface.toggle_recording())
    }

    /// One line for the gate followed by one line per open surface.
    pub fn status(&self) -> Vec<String> {
        let gate = self.gate.snapshot();
        let gate_line = match (gate.phase, gate.holder) {
            (GatePhase::Recording, Some(holder)) => format!("gate: recording ({holder})"),
            _ => "gate: idle".to_string(),
        };

        std::iter::once(gate_line)
            .chain(
                self.surfaces
                    .values()
                    .map(|surface| surface.display().render(surface.kind())),
            )
            .collect()
    }

    /// Close every surface and shut the gate down. Idempotent.
    #[instrument(skip(self))]
    pub fn unload(&mut self) {
        if self.unloaded {
            return;
        }

        for (_, mut surface) in std::mem::take(&mut self.surfaces) {
            surface.close();
        }
        self.gate.shutdown();
        self.unloaded = true;

        info!("Plugin unloaded");
    }
}

impl Drop for Plugin {
    fn drop(&mut self) {
        self.unload();
    }
}
