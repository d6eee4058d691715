//! The store as the analyzer's entry source.

use crate::Database;
use async_trait::async_trait;
use liftlog_core::{DateRange, EntrySource, Scope, SourceError};
use liftlog_types::EntryWithExercise;

#[async_trait]
impl EntrySource for Database {
    async fn entries_in_range(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> Result<Vec<EntryWithExercise>, SourceError> {
        self.entries_for_scope(scope, range)
            .await
            .map_err(|e| Box::new(e) as SourceError)
    }
}
