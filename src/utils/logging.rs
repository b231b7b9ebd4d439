use tracing::Level;

pub fn setup_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_writer(std::io::stderr);
    // try_init so a second call (e.g. from tests) leaves the first subscriber in place.
    let _ = if json {
        builder.json().without_time().try_init()
    } else {
        builder.without_time().try_init()
    };
}
