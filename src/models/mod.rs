pub mod index_data;
pub mod column_names;
pub mod job_execution_history;

pub use index_data::{IndexData, NewIndexData};
pub use column_names::NewColumnName;
pub use job_execution_history::{NewJobExecutionHistory, UpdateJobExecutionHistory};
