pub mod output;
pub mod report;
pub mod table;
