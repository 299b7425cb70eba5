pub mod batch;
pub mod board_file;
pub mod engine;
pub mod stats;

pub use batch::{simulate_batch, simulate_once, RunResult, SimulationConfig};
pub use board_file::{parse_board, parse_board_file, BoardError};
pub use engine::{Engine, LoopOutcome, Termination};
pub use stats::{aggregate_results, BatchSummary, Report, ReportError};
