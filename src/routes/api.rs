//! Resource routes. Collection paths answer with and without the trailing slash.

use crate::handlers::{accounts, login, providers, sneakers};
use crate::models::{Admin, User};
use crate::state::AppState;
use axum::routing::{get, post, MethodRouter};
use axum::Router;

fn collection(router: Router<AppState>, prefix: &str, methods: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(prefix, methods.clone())
        .route(&format!("{}/", prefix), methods)
}

pub fn api_routes(state: AppState) -> Router {
    let router = Router::new();

    let router = collection(
        router,
        "/user",
        get(accounts::list::<User>).post(accounts::create::<User>),
    )
    .route(
        "/user/:id",
        get(accounts::read::<User>)
            .patch(accounts::update::<User>)
            .delete(accounts::delete::<User>),
    );

    let router = collection(
        router,
        "/admin",
        get(accounts::list::<Admin>).post(accounts::create::<Admin>),
    )
    .route(
        "/admin/:id",
        get(accounts::read::<Admin>)
            .patch(accounts::update::<Admin>)
            .delete(accounts::delete::<Admin>),
    );

    let router = collection(router, "/login", post(login::login));

    let router = collection(router, "/sneaker", get(sneakers::list).post(sneakers::create))
        .route("/sneaker/info", get(sneakers::list_information))
        .route("/sneaker/availability", get(sneakers::availability))
        .route(
            "/sneaker/:id",
            get(sneakers::read_information)
                .patch(sneakers::update)
                .delete(sneakers::delete),
        )
        .route("/sneaker/:id/scrapper", get(sneakers::scrappers));

    let router = collection(router, "/provider", get(providers::list).post(providers::create))
        .route(
            "/provider/:id",
            get(providers::read)
                .patch(providers::update)
                .delete(providers::delete),
        );

    router.with_state(state)
}
