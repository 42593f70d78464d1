mod console;
mod export;
mod format;
mod smoke;
mod stress;
mod verdict;

pub(crate) use console::{disable_colors, error as print_error};
pub(crate) use smoke::run_smoke;
pub(crate) use stress::run_stress;
