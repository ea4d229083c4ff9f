pub mod csv_line;
pub mod normalize;
pub mod output;
pub mod partition;
pub mod row;
pub mod transform;

pub use csv_line::split_csv_line;
pub use output::OutputRecord;
pub use partition::{Destination, Partitioner};
pub use row::{Column, Header, Row};
pub use transform::{transform_file, transform_reader, TransformStats};
