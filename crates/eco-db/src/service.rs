//! Service layer: the database handle plus the evaluation settings used when
//! verdicts are computed. All repo methods are implemented as
//! `impl EcoService` blocks.

use eco_compliance::{CategoryRules, Evaluator, TracingObserver};

use crate::EcoDb;
use crate::error::DatabaseError;

static OBSERVER: TracingObserver = TracingObserver;

pub struct EcoService {
    db: EcoDb,
    rules: CategoryRules,
}

impl EcoService {
    /// Open a local database, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = EcoDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Wrap an existing `EcoDb` with the built-in category rules.
    #[must_use]
    pub fn from_db(db: EcoDb) -> Self {
        Self {
            db,
            rules: CategoryRules::default(),
        }
    }

    /// Replace the recommendation category rules.
    #[must_use]
    pub fn with_rules(mut self, rules: CategoryRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub const fn db(&self) -> &EcoDb {
        &self.db
    }

    #[must_use]
    pub const fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    /// Evaluator for `today` with this service's rules, reporting to `tracing`.
    pub(crate) fn evaluator(&self, today: chrono::NaiveDate) -> Evaluator<'static> {
        Evaluator::new(today)
            .with_rules(self.rules.clone())
            .with_observer(&OBSERVER)
    }
}
