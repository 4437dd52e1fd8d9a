mod common;

mod dispatch;
mod scenario;
mod transfer;
mod transfer_from;

#[ctor::ctor]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
