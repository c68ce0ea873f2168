use std::process::ExitCode;

use stock_screener::health::run_health_checks;
use stock_screener::models::Config;

fn main() -> ExitCode {
    println!("🔍 Running health checks...");
    println!("{}", "-".repeat(40));

    let all_passed = match Config::from_env() {
        Ok(config) => {
            let results = run_health_checks(&config);
            for result in &results {
                println!("{}", result);
            }
            results.iter().all(|r| r.passed())
        }
        Err(e) => {
            println!("❌ Configuration Error: {}", e);
            false
        }
    };

    println!("{}", "-".repeat(40));

    if all_passed {
        println!("🎉 All health checks passed!");
        ExitCode::SUCCESS
    } else {
        println!("💥 Some health checks failed!");
        ExitCode::FAILURE
    }
}
