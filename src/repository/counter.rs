use diesel::prelude::*;

use crate::repository::errors::RepositoryResult;
use crate::repository::{CounterStore, DieselRepository, greatest};
use crate::schema::counters;

impl CounterStore for DieselRepository {
    fn next_value(&self, name: &str) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;

        // Single upsert statement: the increment and the read happen together.
        let value = diesel::insert_into(counters::table)
            .values((counters::name.eq(name), counters::value.eq(1_i64)))
            .on_conflict(counters::name)
            .do_update()
            .set(counters::value.eq(counters::value + 1_i64))
            .returning(counters::value)
            .get_result::<i64>(&mut conn)?;

        Ok(value)
    }

    fn advance_to(&self, name: &str, floor: i64) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;

        let value = diesel::insert_into(counters::table)
            .values((counters::name.eq(name), counters::value.eq(floor)))
            .on_conflict(counters::name)
            .do_update()
            .set(counters::value.eq(greatest(counters::value, floor)))
            .returning(counters::value)
            .get_result::<i64>(&mut conn)?;

        Ok(value)
    }
}
