//! `PostgreSQL` repository implementation for families and memberships.

use super::{
    models::{FamilyRow, MembershipRow},
    schema::{families, family_members},
};
use crate::family::{
    domain::{Family, FamilyId, FamilyName, InviteCode, Membership, PersistedFamilyData},
    ports::{FamilyRepository, FamilyRepositoryError, FamilyRepositoryResult},
};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by family adapters.
pub type FamilyPgPool = Pool<ConnectionManager<PgConnection>>;

const INVITE_CODE_UNIQUE_CONSTRAINT: &str = "families_invite_code_key";
const MEMBERSHIP_PRIMARY_KEY: &str = "family_members_pkey";
const MEMBERSHIP_FAMILY_FOREIGN_KEY: &str = "family_members_family_id_fkey";

/// `PostgreSQL`-backed family repository.
#[derive(Debug, Clone)]
pub struct PostgresFamilyRepository {
    pool: FamilyPgPool,
}

impl PostgresFamilyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FamilyPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> FamilyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> FamilyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(FamilyRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(FamilyRepositoryError::persistence)?
    }
}

#[async_trait]
impl FamilyRepository for PostgresFamilyRepository {
    async fn create_with_founder(
        &self,
        family: &Family,
        founder: &Membership,
    ) -> FamilyRepositoryResult<()> {
        let family_row = to_family_row(family);
        let membership_row = to_membership_row(founder);
        let family_id = family.id();
        let code = family.invite_code().clone();
        let founder_id = founder.user_id();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(families::table)
                        .values(&family_row)
                        .execute(tx)?;
                    diesel::insert_into(family_members::table)
                        .values(&membership_row)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if has_constraint(info.as_ref(), INVITE_CODE_UNIQUE_CONSTRAINT) =>
                    {
                        FamilyRepositoryError::DuplicateInviteCode(code.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if has_constraint(info.as_ref(), MEMBERSHIP_PRIMARY_KEY) =>
                    {
                        FamilyRepositoryError::AlreadyMember(founder_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FamilyRepositoryError::DuplicateFamily(family_id)
                    }
                    _ => FamilyRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn add_member(&self, membership: &Membership) -> FamilyRepositoryResult<()> {
        let row = to_membership_row(membership);
        let user_id = membership.user_id();
        let family_id = membership.family_id();

        self.run_blocking(move |connection| {
            diesel::insert_into(family_members::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FamilyRepositoryError::AlreadyMember(user_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info)
                        if has_constraint(info.as_ref(), MEMBERSHIP_FAMILY_FOREIGN_KEY) =>
                    {
                        FamilyRepositoryError::FamilyNotFound(family_id)
                    }
                    _ => FamilyRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: FamilyId) -> FamilyRepositoryResult<Option<Family>> {
        self.run_blocking(move |connection| {
            let row = families::table
                .filter(families::id.eq(id.into_inner()))
                .select(FamilyRow::as_select())
                .first::<FamilyRow>(connection)
                .optional()
                .map_err(FamilyRepositoryError::persistence)?;
            row.map(row_to_family).transpose()
        })
        .await
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> FamilyRepositoryResult<Option<Family>> {
        let lookup = code.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = families::table
                .filter(families::invite_code.eq(lookup))
                .select(FamilyRow::as_select())
                .first::<FamilyRow>(connection)
                .optional()
                .map_err(FamilyRepositoryError::persistence)?;
            row.map(row_to_family).transpose()
        })
        .await
    }

    async fn find_membership(
        &self,
        user_id: UserId,
    ) -> FamilyRepositoryResult<Option<Membership>> {
        self.run_blocking(move |connection| {
            let row = family_members::table
                .filter(family_members::user_id.eq(user_id.into_inner()))
                .select(MembershipRow::as_select())
                .first::<MembershipRow>(connection)
                .optional()
                .map_err(FamilyRepositoryError::persistence)?;
            Ok(row.map(row_to_membership))
        })
        .await
    }

    async fn list_members(&self, family_id: FamilyId) -> FamilyRepositoryResult<Vec<Membership>> {
        self.run_blocking(move |connection| {
            let rows = family_members::table
                .filter(family_members::family_id.eq(family_id.into_inner()))
                .order((family_members::joined_at.asc(), family_members::user_id.asc()))
                .select(MembershipRow::as_select())
                .load::<MembershipRow>(connection)
                .map_err(FamilyRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_membership).collect())
        })
        .await
    }
}

fn to_family_row(family: &Family) -> FamilyRow {
    FamilyRow {
        id: family.id().into_inner(),
        name: family.name().as_str().to_owned(),
        admin_id: family.admin_id().into_inner(),
        invite_code: family.invite_code().as_str().to_owned(),
        created_at: family.created_at(),
    }
}

const fn to_membership_row(membership: &Membership) -> MembershipRow {
    MembershipRow {
        user_id: membership.user_id().into_inner(),
        family_id: membership.family_id().into_inner(),
        joined_at: membership.joined_at(),
    }
}

fn row_to_family(row: FamilyRow) -> FamilyRepositoryResult<Family> {
    let FamilyRow {
        id,
        name,
        admin_id,
        invite_code,
        created_at,
    } = row;

    let family_name = FamilyName::new(name).map_err(FamilyRepositoryError::invalid_persisted_data)?;
    let code =
        InviteCode::parse(invite_code).map_err(FamilyRepositoryError::invalid_persisted_data)?;

    Ok(Family::from_persisted(PersistedFamilyData {
        id: FamilyId::from_uuid(id),
        name: family_name,
        admin_id: UserId::from_uuid(admin_id),
        invite_code: code,
        created_at,
    }))
}

const fn row_to_membership(row: MembershipRow) -> Membership {
    Membership::from_persisted(
        UserId::from_uuid(row.user_id),
        FamilyId::from_uuid(row.family_id),
        row.joined_at,
    )
}

fn has_constraint(info: &dyn DatabaseErrorInformation, constraint: &str) -> bool {
    info.constraint_name().is_some_and(|name| name == constraint)
}
