//! Live status: reading the temperature and fan files, and sequencing polls

pub mod board;
pub mod reader;

pub use board::{StatusBoard, Ticket};
pub use reader::{read_integer, read_reading, read_status, FileReader, SysfsReader};
