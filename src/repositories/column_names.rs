use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::models::NewColumnName;
use crate::schema::column_names::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

/// 以 key 为冲突键的幂等写入，刷新时反复调用
pub fn upsert(conn: &mut PgPoolConn, col: &NewColumnName) -> Result<usize, diesel::result::Error> {
    diesel::insert_into(column_names)
        .values(col)
        .on_conflict(key)
        .do_update()
        .set((col, updated_at.eq(diesel::dsl::now)))
        .execute(conn)
}
