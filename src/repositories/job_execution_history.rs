use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::models::job_execution_history::JobExecutionHistory;
use crate::models::{NewJobExecutionHistory, UpdateJobExecutionHistory};
use crate::schema::job_execution_history::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create(
    conn: &mut PgPoolConn,
    new_history: &NewJobExecutionHistory,
) -> Result<JobExecutionHistory, diesel::result::Error> {
    diesel::insert_into(job_execution_history)
        .values(new_history)
        .get_result(conn)
}

pub fn update(
    conn: &mut PgPoolConn,
    history_id: i32,
    update_data: &UpdateJobExecutionHistory,
) -> Result<JobExecutionHistory, diesel::result::Error> {
    diesel::update(job_execution_history.find(history_id))
        .set(update_data)
        .get_result(conn)
}
