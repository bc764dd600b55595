//! Status projection: turns the resolved cycle state into display text.
//!
//! The animation core never touches windowing. It writes through a
//! [`StatusSink`], and the viewer decides where the text lands (window
//! title, log lines). [`StatusReadout`] is the standard buffering sink.

use crate::animation::{CycleState, PcrStep, TOTAL_CYCLES};

/// Static display text for one PCR step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Step name, e.g. `"Denaturation"`.
    pub title: &'static str,
    /// Reaction temperature for the step.
    pub temperature: &'static str,
    /// One-sentence explanation of what the step does.
    pub description: &'static str,
}

/// Display text for the given step.
#[must_use]
pub fn descriptor(step: PcrStep) -> StepDescriptor {
    match step {
        PcrStep::Denaturation => StepDescriptor {
            title: "Denaturation",
            temperature: "95\u{b0}C",
            description: "Heat separates the double-stranded DNA \
                          into two single strands.",
        },
        PcrStep::Annealing => StepDescriptor {
            title: "Annealing",
            temperature: "60\u{b0}C",
            description: "Primers bind to their complementary \
                          sequences on each single strand.",
        },
        PcrStep::Extension => StepDescriptor {
            title: "Extension",
            temperature: "72\u{b0}C",
            description: "DNA polymerase extends each primer, \
                          building a new complementary strand.",
        },
    }
}

/// Receiver for the per-frame status text.
pub trait StatusSink {
    /// Cycle counter, e.g. `"Cycle 2 / 3"`.
    fn set_cycle(&mut self, text: &str);
    /// Current step title.
    fn set_step(&mut self, text: &str);
    /// Current step temperature.
    fn set_temperature(&mut self, text: &str);
    /// Current step description.
    fn set_description(&mut self, text: &str);
    /// Play/pause button label, `"Pause"` while playing.
    fn set_play_label(&mut self, text: &str);
}

/// Project the resolved state into a sink.
pub fn project(state: &CycleState, playing: bool, sink: &mut dyn StatusSink) {
    let desc = descriptor(state.step);
    sink.set_cycle(&format!("Cycle {} / {TOTAL_CYCLES}", state.cycle));
    sink.set_step(desc.title);
    sink.set_temperature(desc.temperature);
    sink.set_description(desc.description);
    sink.set_play_label(if playing { "Pause" } else { "Play" });
}

/// Buffering sink holding the latest projected strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReadout {
    /// Latest cycle counter text.
    pub cycle: String,
    /// Latest step title.
    pub step: String,
    /// Latest temperature text.
    pub temperature: String,
    /// Latest step description.
    pub description: String,
    /// Latest play/pause label.
    pub play_label: String,
}

impl StatusReadout {
    /// Single-line summary suitable for a window title.
    #[must_use]
    pub fn headline(&self) -> String {
        format!("{} \u{2014} {} ({})", self.cycle, self.step, self.temperature)
    }
}

impl StatusSink for StatusReadout {
    fn set_cycle(&mut self, text: &str) {
        text.clone_into(&mut self.cycle);
    }

    fn set_step(&mut self, text: &str) {
        text.clone_into(&mut self.step);
    }

    fn set_temperature(&mut self, text: &str) {
        text.clone_into(&mut self.temperature);
    }

    fn set_description(&mut self, text: &str) {
        text.clone_into(&mut self.description);
    }

    fn set_play_label(&mut self, text: &str) {
        text.clone_into(&mut self.play_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_cover_all_steps() {
        assert_eq!(descriptor(PcrStep::Denaturation).temperature, "95\u{b0}C");
        assert_eq!(descriptor(PcrStep::Annealing).temperature, "60\u{b0}C");
        assert_eq!(descriptor(PcrStep::Extension).temperature, "72\u{b0}C");
    }

    #[test]
    fn test_project_fills_every_field() {
        let state = CycleState::at(7.5);
        let mut readout = StatusReadout::default();
        project(&state, true, &mut readout);
        assert_eq!(readout.cycle, "Cycle 1 / 3");
        assert_eq!(readout.step, "Annealing");
        assert_eq!(readout.temperature, "60\u{b0}C");
        assert!(!readout.description.is_empty());
        assert_eq!(readout.play_label, "Pause");
    }

    #[test]
    fn test_play_label_tracks_pause_state() {
        let state = CycleState::initial();
        let mut readout = StatusReadout::default();
        project(&state, false, &mut readout);
        assert_eq!(readout.play_label, "Play");
    }

    #[test]
    fn test_headline_is_compact() {
        let mut readout = StatusReadout::default();
        project(&CycleState::at(31.0), true, &mut readout);
        assert_eq!(readout.headline(), "Cycle 3 \u{2014} Denaturation (95\u{b0}C)");
    }
}
