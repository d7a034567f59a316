//! The household request surface.

use super::dto::{
    CreateFamilyBody, CreateListBody, CreateTaskBody, FamilyPublic, InviteCodePublic,
    JoinFamilyBody, ListPublic, LoginBody, RegisterBody, SignupPublic, TaskPublic,
    TaskStatusBody, TokenPublic, UpdateListBody, UpdateTaskBody, UserPublic,
};
use super::error::{ApiError, ApiErrorKind};
use crate::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{ListId, TaskId},
    ports::{ListRepository, TaskRepository},
    services::{
        CreateListRequest, CreateTaskRequest, ListRegistryService, TaskEngineService,
        UpdateListRequest, UpdateTaskRequest,
    },
};
use crate::config::{ConfigError, HASH_MEMORY_VAR, HouseholdConfig, INVITE_CODE_LENGTH_VAR};
use crate::family::{
    adapters::{invite_code::RandomInviteCodeGenerator, memory::InMemoryFamilyRepository},
    ports::{FamilyRepository, InviteCodeGenerator},
    services::FamilyMembershipService,
};
use crate::identity::{
    adapters::{hashing::Argon2PasswordHasher, jwt::JwtTokenCodec, memory::InMemoryUserRepository},
    domain::{BearerCredential, User, UserId},
    ports::{PasswordHasher, TokenCodec, UserRepository},
    services::{AuthSessionService, LoginRequest, RegisterUserRequest},
};
use crate::views::Mutation;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::debug;

/// Reply to the unauthenticated health check.
pub const PONG: &str = "PONG";

/// Request surface backed entirely by in-memory adapters.
pub type InMemoryHouseholdApi<C = DefaultClock> = HouseholdApi<
    InMemoryUserRepository,
    Argon2PasswordHasher,
    JwtTokenCodec,
    InMemoryFamilyRepository,
    RandomInviteCodeGenerator,
    InMemoryBoardStore,
    C,
>;

/// Facade over the identity, family, and board services.
///
/// Every operation except [`Self::ping`], [`Self::register`], and
/// [`Self::login`] takes the caller's bearer credential and fails with
/// [`ApiErrorKind::Unauthenticated`] when it does not resolve to a user.
pub struct HouseholdApi<U, H, T, F, G, B, C>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
    F: FamilyRepository,
    G: InviteCodeGenerator,
    B: ListRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    auth: AuthSessionService<U, H, T, C>,
    families: FamilyMembershipService<F, U, G, C>,
    lists: ListRegistryService<B, F, C>,
    tasks: TaskEngineService<B, F, C>,
}

impl<C> InMemoryHouseholdApi<C>
where
    C: Clock + Send + Sync,
{
    /// Builds an in-memory household from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the hashing costs or invite
    /// code length are rejected by their adapters.
    pub fn in_memory(config: &HouseholdConfig, clock: Arc<C>) -> Result<Self, ConfigError> {
        let hasher = Argon2PasswordHasher::with_costs(config.hash_memory_kib(), config.hash_iterations())
            .map_err(|err| ConfigError::Invalid {
                key: HASH_MEMORY_VAR,
                value: config.hash_memory_kib().to_string(),
                reason: err.to_string(),
            })?;
        let codes = RandomInviteCodeGenerator::new(config.invite_code_length()).map_err(|err| {
            ConfigError::Invalid {
                key: INVITE_CODE_LENGTH_VAR,
                value: config.invite_code_length().to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(hasher),
            Arc::new(JwtTokenCodec::new(config.secret_key(), config.token_lifetime())),
            Arc::new(InMemoryFamilyRepository::new()),
            Arc::new(codes),
            Arc::new(InMemoryBoardStore::new()),
            clock,
        ))
    }
}

impl<U, H, T, F, G, B, C> HouseholdApi<U, H, T, F, G, B, C>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
    F: FamilyRepository,
    G: InviteCodeGenerator,
    B: ListRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    /// Wires the services over shared adapters.
    #[must_use]
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        tokens: Arc<T>,
        families: Arc<F>,
        codes: Arc<G>,
        board: Arc<B>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            auth: AuthSessionService::new(Arc::clone(&users), hasher, tokens, Arc::clone(&clock)),
            families: FamilyMembershipService::new(
                Arc::clone(&families),
                users,
                codes,
                Arc::clone(&clock),
            ),
            lists: ListRegistryService::new(
                Arc::clone(&board),
                Arc::clone(&families),
                Arc::clone(&clock),
            ),
            tasks: TaskEngineService::new(board, families, clock),
        }
    }

    /// Health check.
    #[must_use]
    pub const fn ping(&self) -> &'static str {
        PONG
    }

    /// Registers a user and opens their first session.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields and
    /// [`ApiErrorKind::Conflict`] for a taken email.
    pub async fn register(&self, body: RegisterBody) -> Result<SignupPublic, ApiError> {
        let RegisterBody {
            email,
            name,
            password,
        } = body;
        let mut request = RegisterUserRequest::new(email, password);
        if let Some(display_name) = name {
            request = request.with_name(display_name);
        }
        let registration = self.auth.register(request).await?;
        Ok(SignupPublic {
            user: UserPublic::new(&registration.user, None, None),
            token: TokenPublic::new(&registration.token),
        })
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::InvalidCredentials`] on mismatch.
    pub async fn login(&self, body: LoginBody) -> Result<TokenPublic, ApiError> {
        let token = self
            .auth
            .login(LoginRequest::new(body.email, body.password))
            .await?;
        Ok(TokenPublic::new(&token))
    }

    /// Returns the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::Unauthenticated`] for a bad credential.
    pub async fn current_user(
        &self,
        session: Option<&BearerCredential>,
    ) -> Result<UserPublic, ApiError> {
        let user = self.caller(session).await?;
        self.public_user(&user).await
    }

    /// Returns a user the caller may see: themselves or a fellow family
    /// member.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::NotFound`] for anyone else.
    pub async fn read_user(
        &self,
        session: Option<&BearerCredential>,
        user_id: UserId,
    ) -> Result<UserPublic, ApiError> {
        let caller = self.caller(session).await?;
        if user_id == caller.id() {
            return self.public_user(&caller).await;
        }

        let caller_family = self.families.membership(caller.id()).await?;
        let target_family = self.families.membership(user_id).await?;
        let shares_family = matches!(
            (caller_family, target_family),
            (Some(mine), Some(theirs)) if mine.family_id() == theirs.family_id()
        );
        let target = if shares_family {
            self.auth.find_user(user_id).await?
        } else {
            None
        };
        let Some(user) = target else {
            debug!(user_id = %user_id, "user not visible to caller");
            return Err(ApiError::message(ApiErrorKind::NotFound, "User not found"));
        };
        self.public_user(&user).await
    }

    /// Founds a family with the caller as admin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::AlreadyInFamily`] when the caller has one.
    pub async fn create_family(
        &self,
        session: Option<&BearerCredential>,
        body: CreateFamilyBody,
    ) -> Result<Mutation<FamilyPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let created = self.families.create_family(&caller, body.name).await?;
        Ok(created.map(|family| FamilyPublic::from(&family)))
    }

    /// Joins the family holding an invite code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::AlreadyInFamily`] or
    /// [`ApiErrorKind::InvalidInviteCode`].
    pub async fn join_family(
        &self,
        session: Option<&BearerCredential>,
        body: JoinFamilyBody,
    ) -> Result<Mutation<FamilyPublic>, ApiError> {
        let JoinFamilyBody { invite_code } = body;
        let caller = self.caller(session).await?;
        let joined = self.families.join_family(&caller, &invite_code).await?;
        Ok(joined.map(|family| FamilyPublic::from(&family)))
    }

    /// Returns the caller's family.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::NotInFamily`] when the caller has none.
    pub async fn family(&self, session: Option<&BearerCredential>) -> Result<FamilyPublic, ApiError> {
        let caller = self.caller(session).await?;
        let family = self.families.read_family(&caller).await?;
        Ok(FamilyPublic::from(&family))
    }

    /// Returns the members of the caller's family.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::NotInFamily`] when the caller has none.
    pub async fn family_members(
        &self,
        session: Option<&BearerCredential>,
    ) -> Result<Vec<UserPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let family = self.families.read_family(&caller).await?;
        let members = self.families.read_members(family.id()).await?;
        Ok(members
            .iter()
            .map(|member| {
                UserPublic::new(member, Some(family.id()), Some(family.role_of(member.id())))
            })
            .collect())
    }

    /// Returns the invite code of the caller's family.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::NotInFamily`] when the caller has none.
    pub async fn family_invite_code(
        &self,
        session: Option<&BearerCredential>,
    ) -> Result<InviteCodePublic, ApiError> {
        let caller = self.caller(session).await?;
        let family = self.families.read_family(&caller).await?;
        let code = self.families.read_invite_code(family.id(), &caller).await?;
        Ok(code.into())
    }

    /// Creates a personal or family list.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields and
    /// [`ApiErrorKind::NotInFamily`] for a family list without a family.
    pub async fn create_list(
        &self,
        session: Option<&BearerCredential>,
        body: CreateListBody,
    ) -> Result<Mutation<ListPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let request =
            CreateListRequest::new(body.name, body.color).with_family(body.is_family_list);
        let created = self.lists.create_list(&caller, request).await?;
        Ok(created.map(|summary| ListPublic::from(&summary)))
    }

    /// Returns the caller's personal lists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::Unauthenticated`] for a bad credential.
    pub async fn personal_lists(
        &self,
        session: Option<&BearerCredential>,
    ) -> Result<Vec<ListPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let summaries = self.lists.read_personal_lists(&caller).await?;
        Ok(summaries.iter().map(ListPublic::from).collect())
    }

    /// Returns the lists of the caller's family.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::NotInFamily`] when the caller has none.
    pub async fn family_lists(
        &self,
        session: Option<&BearerCredential>,
    ) -> Result<Vec<ListPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let summaries = self.lists.read_family_lists(&caller).await?;
        Ok(summaries.iter().map(ListPublic::from).collect())
    }

    /// Returns one list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::NotFound`] or [`ApiErrorKind::Forbidden`].
    pub async fn list(
        &self,
        session: Option<&BearerCredential>,
        list_id: ListId,
    ) -> Result<ListPublic, ApiError> {
        let caller = self.caller(session).await?;
        let summary = self.lists.read_list(list_id, &caller).await?;
        Ok(ListPublic::from(&summary))
    }

    /// Renames or recolours a list.
    ///
    /// # Errors
    ///
    /// Returns access errors and validation errors.
    pub async fn update_list(
        &self,
        session: Option<&BearerCredential>,
        list_id: ListId,
        body: UpdateListBody,
    ) -> Result<Mutation<ListPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let mut request = UpdateListRequest::new();
        if let Some(name) = body.name {
            request = request.with_name(name);
        }
        if let Some(color) = body.color {
            request = request.with_color(color);
        }
        let updated = self.lists.update_list(list_id, &caller, request).await?;
        Ok(updated.map(|summary| ListPublic::from(&summary)))
    }

    /// Deletes a list and its tasks.
    ///
    /// # Errors
    ///
    /// Returns access errors.
    pub async fn delete_list(
        &self,
        session: Option<&BearerCredential>,
        list_id: ListId,
    ) -> Result<Mutation<()>, ApiError> {
        let caller = self.caller(session).await?;
        Ok(self.lists.delete_list(list_id, &caller).await?)
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiErrorKind::InsufficientPermissions`] when a non-admin
    /// assigns someone else, plus access and validation errors.
    pub async fn create_task(
        &self,
        session: Option<&BearerCredential>,
        body: CreateTaskBody,
    ) -> Result<Mutation<TaskPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let CreateTaskBody {
            list_id,
            title,
            notes,
            user_id,
        } = body;
        let mut request = CreateTaskRequest::new(list_id, title);
        if let Some(text) = notes {
            request = request.with_notes(text);
        }
        if let Some(assignee) = user_id {
            request = request.with_assignee(assignee);
        }
        let created = self.tasks.create_task(&caller, request).await?;
        Ok(created.map(|task| TaskPublic::from(&task)))
    }

    /// Returns the tasks of a list.
    ///
    /// # Errors
    ///
    /// Returns access errors.
    pub async fn tasks(
        &self,
        session: Option<&BearerCredential>,
        list_id: ListId,
    ) -> Result<Vec<TaskPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let tasks = self.tasks.read_tasks(list_id, &caller).await?;
        Ok(tasks.iter().map(TaskPublic::from).collect())
    }

    /// Edits a task.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::create_task`] and
    /// [`ApiErrorKind::NotFound`] for an unknown task.
    pub async fn update_task(
        &self,
        session: Option<&BearerCredential>,
        task_id: TaskId,
        body: UpdateTaskBody,
    ) -> Result<Mutation<TaskPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let UpdateTaskBody {
            title,
            notes,
            user_id,
        } = body;
        let mut request = UpdateTaskRequest::new();
        if let Some(text) = title {
            request = request.with_title(text);
        }
        if let Some(text) = notes {
            request = request.with_notes(text);
        }
        if let Some(assignee) = user_id {
            request = request.with_assignee(assignee);
        }
        let updated = self.tasks.update_task(&caller, task_id, request).await?;
        Ok(updated.map(|task| TaskPublic::from(&task)))
    }

    /// Marks a task completed or reopens it.
    ///
    /// # Errors
    ///
    /// Returns access errors and [`ApiErrorKind::NotFound`].
    pub async fn update_task_status(
        &self,
        session: Option<&BearerCredential>,
        task_id: TaskId,
        body: TaskStatusBody,
    ) -> Result<Mutation<TaskPublic>, ApiError> {
        let caller = self.caller(session).await?;
        let updated = self
            .tasks
            .update_task_status(&caller, task_id, body.completed)
            .await?;
        Ok(updated.map(|task| TaskPublic::from(&task)))
    }

    /// Deletes one task.
    ///
    /// # Errors
    ///
    /// Returns access errors and [`ApiErrorKind::NotFound`].
    pub async fn delete_task(
        &self,
        session: Option<&BearerCredential>,
        task_id: TaskId,
    ) -> Result<Mutation<()>, ApiError> {
        let caller = self.caller(session).await?;
        Ok(self.tasks.delete_task(&caller, task_id).await?)
    }

    /// Removes every completed task from a list.
    ///
    /// # Errors
    ///
    /// Returns access errors.
    pub async fn clear_completed(
        &self,
        session: Option<&BearerCredential>,
        list_id: ListId,
    ) -> Result<Mutation<()>, ApiError> {
        let caller = self.caller(session).await?;
        let cleared = self.tasks.clear_completed_tasks(&caller, list_id).await?;
        Ok(cleared.map(|_| ()))
    }

    async fn caller(&self, session: Option<&BearerCredential>) -> Result<User, ApiError> {
        Ok(self.auth.current_user(session).await?)
    }

    async fn public_user(&self, user: &User) -> Result<UserPublic, ApiError> {
        let membership = self.families.membership(user.id()).await?;
        let role = self.families.role(user).await?;
        Ok(UserPublic::new(
            user,
            membership.map(|joined| joined.family_id()),
            role,
        ))
    }
}
