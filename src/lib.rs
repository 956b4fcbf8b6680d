pub mod commands;
pub mod error;
pub mod formats;
pub mod logging;
pub mod model;
pub mod report;
pub mod tabulator;
pub mod util;
