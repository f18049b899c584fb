#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{
    mint_session_token, op_error, op_ok, password_digest, require_session, require_string,
    store_error, ts_ms_to_rfc3339,
};
use cl_core::ids::Email;
use cl_core::model::Role;
use cl_storage::{SessionCreateRequest, StoreError, UserCreateRequest};
use serde_json::{Value, json};

const SESSION_TTL_MS: i64 = 14 * 24 * 60 * 60 * 1000;

fn open_session(server: &mut ApiServer, email: &str, user_id: &str) -> Result<Value, Value> {
    let token = mint_session_token(email);
    let session = server
        .store
        .session_create(SessionCreateRequest {
            token,
            user_id: user_id.to_string(),
            ttl_ms: SESSION_TTL_MS,
        })
        .map_err(store_error)?;
    Ok(json!({
        "token": session.token,
        "expires_at": ts_ms_to_rfc3339(session.expires_at_ms),
    }))
}

pub(crate) fn signup(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let email = match require_string(args, "email") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let password = match require_string(args, "password") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let email = match Email::try_new(email) {
        Ok(v) => v,
        Err(err) => return op_error("INVALID_INPUT", &err.to_string()),
    };
    if password.len() < 8 {
        return op_error("INVALID_INPUT", "password must be at least 8 characters");
    }

    // First account on a fresh store bootstraps the admin role.
    let role = match server.store.users_count() {
        Ok(0) => Role::Admin,
        Ok(_) => Role::Learner,
        Err(err) => return store_error(err),
    };

    let password_hash = password_digest(email.as_str(), &password);
    let user = match server.store.user_create(UserCreateRequest {
        email,
        password_hash,
        role,
    }) {
        Ok(user) => user,
        Err(err) => return store_error(err),
    };

    let session = match open_session(server, &user.email, &user.id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    op_ok(
        "signup",
        json!({ "user": super::views::user_json(&user), "session": session }),
    )
}

pub(crate) fn login(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let email = match require_string(args, "email") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let password = match require_string(args, "password") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // Malformed emails get the same rejection as wrong credentials so the
    // response does not leak which accounts exist.
    let Ok(email) = Email::try_new(email) else {
        return op_error("UNAUTHORIZED", "Invalid email or password");
    };

    let user = match server.store.user_by_email(email.as_str()) {
        Ok(Some(user)) => user,
        Ok(None) => return op_error("UNAUTHORIZED", "Invalid email or password"),
        Err(err) => return store_error(err),
    };
    if user.password_hash != password_digest(email.as_str(), &password) {
        return op_error("UNAUTHORIZED", "Invalid email or password");
    }

    let session = match open_session(server, &user.email, &user.id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    op_ok(
        "login",
        json!({ "user": super::views::user_json(&user), "session": session }),
    )
}

pub(crate) fn logout(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let Some(token) = args.get("session").and_then(|v| v.as_str()) else {
        return op_error("UNAUTHORIZED", "session is required");
    };
    match server.store.session_delete(token) {
        Ok(deleted) => op_ok("logout", json!({ "deleted": deleted })),
        Err(err) => store_error(err),
    }
}

pub(crate) fn whoami(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let user = match server.store.user_get(&session.user_id) {
        Ok(Some(user)) => user,
        // Session rows reference users by id; a dangling one is a store bug.
        Ok(None) => return store_error(StoreError::UnknownId),
        Err(err) => return store_error(err),
    };
    let unread = match server.store.notifications_unread_count(&user.id) {
        Ok(v) => v,
        Err(err) => return store_error(err),
    };
    op_ok(
        "whoami",
        json!({
            "user": super::views::user_json(&user),
            "unread_notifications": unread,
        }),
    )
}
