//! Running storefront and shared world for the shopping scenarios.
//!
//! The server runs on the in-memory adapters inside a single-threaded Tokio
//! runtime plus a `LocalSet`, because Actix uses `spawn_local` internally.
//! Dropping the [`WorldFixture`] stops the server even if a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use storefront::Trace;
use storefront::domain::ports::FixtureLoginService;
use storefront::domain::{FavoritesService, ListingsService, TRACE_ID_HEADER};
use storefront::inbound::http::catalogue::{category_tags, expand_synonyms, list_categories};
use storefront::inbound::http::favorites::{my_favorites, toggle_favorite};
use storefront::inbound::http::listings::{
    browse_listings, change_listing_status, create_listing, delete_listing, listing_detail,
    search_listings, update_listing,
};
use storefront::inbound::http::state::{HttpState, HttpStatePorts};
use storefront::inbound::http::users::{login, my_listings};
use storefront::outbound::memory::InMemoryListingRepository;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Observations recorded by the steps of one scenario.
pub(crate) struct StorefrontWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) session_cookie: Option<String>,
    pub(crate) published_id: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_cache_control: Option<String>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<StorefrontWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // The LocalSet must be driven on the thread that owns it; the future
        // below must not borrow the world again.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// A captured HTTP exchange.
pub(crate) struct Exchange {
    pub(crate) status: u16,
    pub(crate) body: Value,
    pub(crate) cache_control: Option<String>,
    pub(crate) trace_id: Option<String>,
    pub(crate) set_cookie: Option<String>,
}

/// Request description for [`send`].
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) query: &'a [(&'a str, &'a str)],
    pub(crate) payload: Option<Value>,
    pub(crate) with_session: bool,
}

impl<'a> RequestSpec<'a> {
    pub(crate) fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            query: &[],
            payload: None,
            with_session: false,
        }
    }

    pub(crate) fn post(path: &'a str, payload: Option<Value>) -> Self {
        Self {
            method: Method::POST,
            path,
            query: &[],
            payload,
            with_session: false,
        }
    }

    pub(crate) fn query(mut self, query: &'a [(&'a str, &'a str)]) -> Self {
        self.query = query;
        self
    }

    pub(crate) fn signed_in(mut self) -> Self {
        self.with_session = true;
        self
    }
}

fn header_value(headers: &header::HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Perform `spec` against the running server and record the outcome.
pub(crate) fn send(world: &SharedWorld, spec: RequestSpec<'_>) -> Exchange {
    let RequestSpec {
        method,
        path,
        query,
        payload,
        with_session,
    } = spec;
    let cookie = if with_session {
        let cookie = world.borrow().session_cookie.clone();
        Some(cookie.expect("signed-in step must run first"))
    } else {
        None
    };

    let exchange = {
        let ctx = world.borrow();
        let base_url = ctx.base_url.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            let mut request = Client::default().request(method, format!("{base_url}{path}"));
            if !query.is_empty() {
                request = request.query(&query).expect("encodable query");
            }
            if let Some(cookie) = cookie {
                request = request.insert_header((header::COOKIE, cookie));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await,
                None => request.send().await,
            }
            .expect("request reaches the server");

            let headers = response.headers();
            let cache_control = header_value(headers, header::CACHE_CONTROL);
            let trace_id = header_value(headers, TRACE_ID_HEADER);
            let set_cookie = header_value(headers, header::SET_COOKIE);
            let status = response.status().as_u16();
            let bytes = response.body().await.expect("response body");
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("JSON body")
            };
            Exchange {
                status,
                body,
                cache_control,
                trace_id,
                set_cookie,
            }
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(exchange.status);
    ctx.last_body = Some(exchange.body.clone());
    ctx.last_cache_control.clone_from(&exchange.cache_control);
    ctx.last_trace_id.clone_from(&exchange.trace_id);
    exchange
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

fn memory_state() -> HttpState {
    let listings = Arc::new(InMemoryListingRepository::new());
    let favorites = Arc::new(listings.favorites());
    let listings_service = Arc::new(ListingsService::new(
        listings.clone(),
        Arc::new(DefaultClock),
    ));
    let favorites_service = Arc::new(FavoritesService::new(favorites, listings));
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        listings: listings_service.clone(),
        listing_commands: listings_service,
        favorites: favorites_service.clone(),
        favorites_query: favorites_service,
    })
}

async fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(session_middleware(key.clone()))
            .service(login)
            .service(my_listings)
            .service(my_favorites)
            .service(list_categories)
            .service(category_tags)
            .service(expand_synonyms)
            .service(browse_listings)
            .service(search_listings)
            .service(create_listing)
            .service(listing_detail)
            .service(update_listing)
            .service(change_listing_status)
            .service(delete_listing)
            .service(toggle_favorite);

        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let (base_url, server) = local
        .block_on(&runtime, spawn_server(memory_state()))
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(StorefrontWorld {
            runtime,
            local,
            base_url,
            server,
            session_cookie: None,
            published_id: None,
            last_status: None,
            last_body: None,
            last_cache_control: None,
            last_trace_id: None,
        })),
    }
}
