use tracing::debug;

use crate::api::PlanApi;
use crate::error::AppError;
use crate::models::{EntityId, HoD, Role, RoleRecord};

/// Linear scan on `accountId`; ids compare in normalised form so a string
/// account id matches a numeric one.
pub fn find_by_account_id<'a, R: RoleRecord>(records: &'a [R], account_id: &EntityId) -> Option<&'a R> {
    records.iter().find(|r| r.account_id() == account_id)
}

pub fn find_hod_by_account_id<'a>(hods: &'a [HoD], account_id: &EntityId) -> Option<&'a HoD> {
    find_by_account_id(hods, account_id)
}

pub async fn resolve_current_hod(api: &dyn PlanApi, account_id: &EntityId) -> Result<Option<HoD>, AppError> {
    let hods = api.fetch_hods().await?;
    Ok(find_hod_by_account_id(&hods, account_id).cloned())
}

/// Maps the signed-in account to its role-specific id.
///
/// The backend has no lookup-by-account endpoint, so this fetches the whole
/// role list. Callers only see this function.
pub async fn resolve_current_role_id(
    api: &dyn PlanApi,
    role: Role,
    account_id: &EntityId,
) -> Result<EntityId, AppError> {
    if account_id.is_empty() {
        return Err(AppError::MissingParameter("account id"));
    }

    let found = match role {
        Role::HoD => {
            let list = api.fetch_hods().await?;
            find_by_account_id(&list, account_id).map(|r| r.role_id().clone())
        }
        Role::Lecturer => {
            let list = api.fetch_lecturers().await?;
            find_by_account_id(&list, account_id).map(|r| r.role_id().clone())
        }
        Role::Student => {
            let list = api.fetch_students().await?;
            find_by_account_id(&list, account_id).map(|r| r.role_id().clone())
        }
    };

    debug!("resolved {} for account {}: {:?}", role.label(), account_id, found);

    found.ok_or_else(|| {
        AppError::NotAuthorized(format!(
            "Account {} is not a registered {}",
            account_id,
            role.label()
        ))
    })
}
