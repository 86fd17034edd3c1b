mod authentication_layer;

use authentication_layer::*;
use weft::{Buildable, Injector, Partial};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// API Layer
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

async fn root_handler(
    axum::Extension(injector): axum::Extension<Injector>,
    axum::Extension(subject): axum::Extension<Subject>,
) -> impl axum::response::IntoResponse {
    // TODO: We should add a custom extractor or a macro to:
    //   a) avoid pulling objects out manually from the injector
    //   b) allow us to somehow analyze the handler dependencies to make them a part
    //      of component verification
    let greeter = injector.get::<dyn Greeter>().unwrap();

    greeter.greet(&subject.account_name)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Domain Layer
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Infra Layer
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Request identity (the `Subject`) is request-scoped, not container-scoped —
// `weft::Component` is sealed once at startup and shared by every request, so
// it cannot be re-opened to add a per-request value the way the old chained
// catalog did. `Greeter` instead takes the name as a call argument.
#[derive(Buildable)]
struct GreeterImpl;

impl Greeter for GreeterImpl {
    fn greet(&self, name: &str) -> String {
        format!("GreeterImpl::greet -> \"Hello, {name}\"")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() {
    let component = Partial::new()
        .add::<GreeterImpl>()
        .bind::<dyn Greeter, GreeterImpl>()
        .seal()
        .unwrap();

    let injector = Injector::new(component);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:5456")
        .await
        .unwrap();

    let app = axum::Router::new()
        .route("/", axum::routing::get(root_handler))
        .layer(AuthenticationLayer::new())
        .layer(axum::Extension(injector));

    eprintln!("Listening on http://{}", listener.local_addr().unwrap());

    eprintln!(
        "Try making a request like:\n  xh -v GET 'http://{}' 'Authorization:bearer Bob'",
        listener.local_addr().unwrap()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async { tokio::signal::ctrl_c().await.unwrap() })
        .await
        .unwrap();
}
