//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Every test gets its own database cloned from a pre-migrated template on
//! the shared embedded cluster, and drops it afterwards.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use homelist::{
    board::{
        adapters::postgres::PostgresBoardStore,
        domain::{ListColor, ListName, ListOwner, Task, TaskList, TaskTitle},
        ports::{ListRepository, TaskRepository},
    },
    family::{
        adapters::postgres::PostgresFamilyRepository,
        domain::{Family, FamilyName, InviteCode, Membership},
        ports::FamilyRepository,
    },
    identity::{
        adapters::postgres::PostgresUserRepository,
        domain::{EmailAddress, PasswordHash, User},
        ports::UserRepository,
    },
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Result type for integration tests.
pub type TestResult<T = ()> = Result<T, eyre::Report>;

/// Schema applied to the template database.
const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-01-15-000000_create_household/up.sql");

/// Template database name for the pre-migrated schema.
const TEMPLATE_DB: &str = "homelist_test_template";

/// Creates a runtime for driving the async stores from sync tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> TestResult<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with the schema applied.
fn ensure_template(cluster: &TestCluster) -> TestResult {
    cluster.ensure_template_exists(TEMPLATE_DB, |db_name| -> pg_embedded_setup_unpriv::BootstrapResult<()> {
        let url = cluster.connection().database_url(db_name);
        let mut conn = PgConnection::establish(&url).map_err(|err| eyre::eyre!("{err}"))?;
        conn.batch_execute(SCHEMA_SQL)
            .map_err(|err| eyre::eyre!("schema setup failed: {err}"))?;
        Ok(())
    })?;
    Ok(())
}

/// Per-test database cloned from the template and dropped on exit.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
}

impl TestDatabase {
    /// Clones the template into a fresh database named after `purpose`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the clone cannot be created.
    pub fn create(cluster: &'static TestCluster, purpose: &str) -> TestResult<Self> {
        ensure_template(cluster)?;
        let name = format!("test_{purpose}_{}", Uuid::new_v4().simple());
        cluster.create_database_from_template(name.as_str(), TEMPLATE_DB)?;
        Ok(Self { cluster, name })
    }

    /// Returns the connection URL of this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.connection().database_url(&self.name)
    }

    /// Opens a direct connection for raw SQL checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub fn connect(&self) -> TestResult<PgConnection> {
        Ok(PgConnection::establish(&self.url())?)
    }

    /// Builds every store over one shared pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn stores(&self) -> TestResult<Stores> {
        let pool = Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(self.url()))?;
        Ok(Stores {
            users: PostgresUserRepository::new(pool.clone()),
            families: PostgresFamilyRepository::new(pool.clone()),
            board: PostgresBoardStore::new(pool),
        })
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(self.name.as_str()));
    }
}

/// The three `PostgreSQL` stores sharing one database.
pub struct Stores {
    /// User accounts.
    pub users: PostgresUserRepository,
    /// Families and memberships.
    pub families: PostgresFamilyRepository,
    /// Lists and tasks.
    pub board: PostgresBoardStore,
}

impl Stores {
    /// Stores a user with a placeholder hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is invalid or the insert fails.
    pub async fn user(&self, email: &str) -> TestResult<User> {
        let user = User::register(
            EmailAddress::new(email)?,
            None,
            PasswordHash::new("$argon2id$stub")?,
            &DefaultClock,
        );
        self.users.store(&user).await?;
        Ok(user)
    }

    /// Founds a family with `admin` as its founder.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is malformed or the commit fails.
    pub async fn family(&self, admin: &User, code: &str) -> TestResult<Family> {
        let family = Family::found(
            FamilyName::new("Smiths")?,
            admin.id(),
            InviteCode::parse(code)?,
            &DefaultClock,
        );
        let founder = Membership::begin(admin.id(), family.id(), &DefaultClock);
        self.families.create_with_founder(&family, &founder).await?;
        Ok(family)
    }

    /// Stores a personal list.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn personal_list(&self, owner: &User) -> TestResult<TaskList> {
        let list = TaskList::create(
            ListName::new("Groceries")?,
            ListColor::parse("#00FF7F")?,
            ListOwner::Personal {
                owner_id: owner.id(),
            },
            &DefaultClock,
        );
        self.board.store_list(&list).await?;
        Ok(list)
    }

    /// Stores an open task assigned to `assignee`.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is invalid or the insert fails.
    pub async fn task(&self, list: &TaskList, title: &str, assignee: &User) -> TestResult<Task> {
        let task = Task::create(
            list.id(),
            TaskTitle::new(title)?,
            None,
            assignee.id(),
            &DefaultClock,
        );
        self.board.store_task(&task).await?;
        Ok(task)
    }
}
