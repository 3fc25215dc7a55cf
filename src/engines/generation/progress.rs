use super::evolution_engine::{ProgressCallback, Slot};
use std::io::Write;
use std::sync::mpsc::Sender;

/// Discards all progress events.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {}

/// Single self-overwriting status line on stdout.
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, worst_fitness: f64) {
        print!(
            "\rgeneration: {} best fitness: {} worst fitness: {}",
            generation, best_fitness, worst_fitness
        );
        let _ = std::io::stdout().flush();
    }

    fn on_run_complete(&mut self, generations: usize) {
        if generations > 0 {
            println!();
        }
    }
}

/// Reports progress through the `log` facade instead of the terminal.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, worst_fitness: f64) {
        log::info!(
            "Generation {} complete. Best fitness: {:.4}, worst fitness: {:.4}",
            generation,
            best_fitness,
            worst_fitness
        );
    }
}

// For reporting to another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        best_fitness: f64,
        worst_fitness: f64,
    },
    SlotEvaluated {
        slot: Slot,
        evaluated: usize,
    },
    RunComplete(usize),
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, worst_fitness: f64) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            worst_fitness,
        });
    }

    fn on_slot_evaluated(&mut self, slot: Slot, evaluated: usize) {
        let _ = self
            .sender
            .send(ProgressMessage::SlotEvaluated { slot, evaluated });
    }

    fn on_run_complete(&mut self, generations: usize) {
        let _ = self.sender.send(ProgressMessage::RunComplete(generations));
    }
}
