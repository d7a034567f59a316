//! Shared fixtures for board service tests.

use std::sync::Arc;

use crate::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{ListId, ListSummary},
    services::{CreateListRequest, ListRegistryService, TaskEngineService},
};
use crate::family::{
    adapters::{invite_code::RandomInviteCodeGenerator, memory::InMemoryFamilyRepository},
    domain::Family,
    services::FamilyMembershipService,
};
use crate::identity::{
    adapters::memory::InMemoryUserRepository,
    domain::{EmailAddress, PasswordHash, User},
    ports::UserRepository,
};
use crate::test_support::ManualClock;
use chrono::Duration;
use rstest::fixture;

pub(super) type Lists = ListRegistryService<InMemoryBoardStore, InMemoryFamilyRepository, ManualClock>;
pub(super) type Tasks = TaskEngineService<InMemoryBoardStore, InMemoryFamilyRepository, ManualClock>;
type Families = FamilyMembershipService<
    InMemoryFamilyRepository,
    InMemoryUserRepository,
    RandomInviteCodeGenerator,
    ManualClock,
>;

pub(super) struct Board {
    pub(super) lists: Lists,
    pub(super) tasks: Tasks,
    pub(super) families: Families,
    pub(super) store: Arc<InMemoryBoardStore>,
    pub(super) family_store: Arc<InMemoryFamilyRepository>,
    pub(super) users: Arc<InMemoryUserRepository>,
    pub(super) clock: Arc<ManualClock>,
}

impl Board {
    pub(super) async fn user(&self, email: &str) -> User {
        let user = User::register(
            EmailAddress::new(email).expect("valid email"),
            None,
            PasswordHash::new("$argon2id$stub").expect("non-empty hash"),
            &*self.clock,
        );
        self.users.store(&user).await.expect("user should store");
        self.clock.advance(Duration::seconds(1));
        user
    }

    pub(super) async fn found(&self, admin: &User, name: &str) -> Family {
        self.families
            .create_family(admin, name)
            .await
            .expect("family creation should succeed")
            .into_value()
    }

    pub(super) async fn join(&self, user: &User, family: &Family) {
        self.families
            .join_family(user, family.invite_code().as_str())
            .await
            .expect("join should succeed");
    }

    pub(super) async fn list(&self, owner: &User, name: &str, is_family: bool) -> ListId {
        let created = self
            .lists
            .create_list(owner, CreateListRequest::new(name, "#3366CC").with_family(is_family))
            .await
            .expect("list creation should succeed");
        self.clock.advance(Duration::seconds(1));
        let summary: &ListSummary = created.value();
        summary.list.id()
    }
}

/// Alice founds "Smiths", Bob joins it, Eve stays alone.
pub(super) struct Smiths {
    pub(super) board: Board,
    pub(super) alice: User,
    pub(super) bob: User,
    pub(super) eve: User,
    pub(super) family: Family,
}

#[fixture]
pub(super) fn board() -> Board {
    let families = Arc::new(InMemoryFamilyRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let store = Arc::new(InMemoryBoardStore::new());
    let clock = Arc::new(ManualClock::new());
    Board {
        lists: ListRegistryService::new(Arc::clone(&store), Arc::clone(&families), Arc::clone(&clock)),
        tasks: TaskEngineService::new(Arc::clone(&store), Arc::clone(&families), Arc::clone(&clock)),
        families: FamilyMembershipService::new(
            Arc::clone(&families),
            Arc::clone(&users),
            Arc::new(RandomInviteCodeGenerator::default()),
            Arc::clone(&clock),
        ),
        store,
        family_store: families,
        users,
        clock,
    }
}

pub(super) async fn smiths() -> Smiths {
    let household = board();
    let alice = household.user("alice@example.com").await;
    let bob = household.user("bob@example.com").await;
    let eve = household.user("eve@example.com").await;
    let family = household.found(&alice, "Smiths").await;
    household.join(&bob, &family).await;
    Smiths {
        board: household,
        alice,
        bob,
        eve,
        family,
    }
}
