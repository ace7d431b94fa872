use warden::utils::errors::WardenError;

fn main() -> Result<(), WardenError> {
    tokio::runtime::Builder::new_multi_thread()
        // Cap the number of blocking threads - in some heavy-load argon cases we can see
        // explosions of threads so constraining here prohibits too much resource use.
        .max_blocking_threads(num_cpus::get())
        .enable_all()
        .build()
        .unwrap()
        .block_on(async {
            warden::lib_main().await
        })
}
