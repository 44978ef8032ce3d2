use server::bootstrap::{self, ServiceKind};

// 仅作为启动入口，将执行流程委托给 crates/server
fn main() -> std::process::ExitCode {
    bootstrap::run(ServiceKind::Customer)
}
