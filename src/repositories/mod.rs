pub mod column_names;
pub mod index_data;
pub mod job_execution_history;
