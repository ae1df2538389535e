use diesel::prelude::*;

use crate::schema::column_names;

/// 列展示目录只有写路径（刷新时幂等重写），读取由展示侧自行处理
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = column_names)]
pub struct NewColumnName {
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub display_order: i32,
}
