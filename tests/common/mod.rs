pub mod helper;

use lazy_static::lazy_static;
use tonic::transport::Channel;
use tokio_retry::{Retry, strategy::FixedInterval};
use std::{collections::HashMap, thread::JoinHandle};
use parking_lot::{Mutex, RawMutex, lock_api::MutexGuard};
use warden::grpc::{api::warden_client::WardenClient, internal::internal_client::InternalClient};

lazy_static! {
    // A mutex around the TestContext to ensure only one test can be using the service at a time.
    // This ensures tests do not corrupt the configuration, data or clock used by any other test.
    static ref TEST_MUTEX: Mutex<TestContext> = {
        let ctx = TestContext::default();
        ctx.config.apply();
        Mutex::new(ctx)
    };

    // A async runtime needed to run the service being tested in. This ensures when a test terminates,
    // the service is still running and available for another test.
    static ref RT: tokio::runtime::Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .enable_io()
        .build()
        .unwrap();
}

///
/// Test's should start by calling start_warden to obtain a lock on the TestContext.
///
/// This will give them gRPC clients to talk to a running Warden server.
///
pub struct TestContext {
    config: TestConfig,
    handle: Option<JoinHandle<()>>,
    client: Option<WardenClient<Channel>>,
    internal: Option<InternalClient<Channel>>,
}

impl TestContext {
    pub fn client(&mut self) -> &mut WardenClient<Channel> {
        self.client.as_mut().expect("Someone asked for a test client when there wasn't one")
    }

    pub fn internal(&mut self) -> &mut InternalClient<Channel> {
        self.internal.as_mut().expect("Someone asked for a test internal client when there wasn't one")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self {
            handle: None,
            client: None,
            internal: None,
            config: Default::default()
        }
    }
}

#[derive(PartialEq)]
pub struct TestConfig {
    map: HashMap<&'static str, &'static str>
}

impl Default for TestConfig {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("ADDRESS", "[::1]:50052");
        map.insert("TOKEN_TTL_SECONDS", "3600");
        map.insert("TOKEN_LENGTH", "43");
        map.insert("THROTTLE_SECONDS", "60");
        map.insert("MIN_PASSWORD_LENGTH", "8");
        map.insert("MAX_PASSWORD_LENGTH", "128");
        map.insert("HASH_ALGORITHM", "argon2");
        map.insert("SIGNING_KEY", "a-test-only-signing-key");
        map.insert("TLS", "false");

        Self {
            map
        }
    }
}

impl TestConfig {
    ///
    /// Apply the configuration vaules to the local environment variables.
    ///
    fn apply(&self) {
        for entry in &self.map {
            if *entry.1 == String::default() {
                std::env::remove_var(entry.0);
            } else {
                std::env::set_var(entry.0, entry.1);
            }
        }
    }

    fn get(&self, key: &str) -> &str {
        self.map.get(key).expect(&format!("No test config {}", key))
    }
}


///
/// Acquires a lock so only one test may run at a time and returns a TestContext.
///
/// Ensures the warden server is started with the specified configuration.
///
/// The returned TestContext contains gRPC clients that can be used by the test to talk to
/// the running server.
///
pub async fn start_warden(config: TestConfig) -> MutexGuard<'static, RawMutex, TestContext> {
    let mut lock = TEST_MUTEX.lock();

    // If the configuration has changed - apply the new configuration. This allows tests
    // to run against a server instance where they control the configuration.
    if lock.config != config {
        lock.config = config;
        lock.config.apply();

        // Terminate and destroy any running server.
        lock.handle.take();

        // Destroy any previous test clients.
        lock.client.take();
        lock.internal.take();
    }

    // If the server is not running, start it.
    if lock.handle.is_none() {
        // Launch the application in a separate runtime instance. This ensures it will survive test thread
        // teardowns. Because each test runs in it's own green thread with a runtime with no worker threads,
        // we need to ensure the launched server survives a tear-down.
        let handle = RT.handle();
        lock.handle = Some(std::thread::spawn(move || {
            let _ignore = handle.block_on(async {
                warden::lib_main().await
            });
        }));
    }

    // Connect a test client to the service - the closure is used in retry spawn below.
    let address = lock.config.get("ADDRESS");
    let connect = move || {
        WardenClient::connect(format!("http://{}", address))
    };

    // Try to connect for up-to 1 minute.
    let client = Retry::spawn(FixedInterval::from_millis(100).take(600), connect)
        .await
        .expect("Unable to connect test client to server under test");

    // Need to establish an internal client too.
    let connect = move || {
        InternalClient::connect(format!("http://{}", address))
    };

    // Try to connect for up-to 1 minute.
    let internal_client = Retry::spawn(FixedInterval::from_millis(100).take(600), connect)
        .await
        .expect("Unable to connect internal test client to server under test");

    // Put the clients in the TestContext struct for the test to use.
    lock.client = Some(client);
    lock.internal = Some(internal_client);

    lock
}
