//! debt-payoff-engine CLI
//!
//! Run amortization and payoff simulations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Month-by-month schedule for a fixed payment
//! debt-payoff-engine schedule --principal 5000 --rate 22 --payment 285
//!
//! # Payment needed to retire a debt in 36 months
//! debt-payoff-engine payment --principal 5000 --rate 22 --months 36
//!
//! # Compare payment strategies from a JSON file
//! debt-payoff-engine strategies --input strategies.json --format json
//!
//! # Avalanche vs snowball across several debts
//! debt-payoff-engine plan --input debts.json --budget 900
//!
//! # Generate a random portfolio for testing
//! debt-payoff-engine generate --debts 6
//! ```
//!
//! Set `RUST_LOG=debug` to see engine diagnostics on stderr.

use chrono::NaiveDate;
use debt_payoff_engine::amortization::comparison::StrategyComparison;
use debt_payoff_engine::amortization::engine::AmortizationEngine;
use debt_payoff_engine::amortization::strategy::{StrategyDefinition, StrategySet, MINIMUM};
use debt_payoff_engine::core::config::EngineConfig;
use debt_payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use debt_payoff_engine::planner::payoff::{PayoffOrder, PayoffPlanner};
use debt_payoff_engine::simulation::sample_portfolio::{generate_random_portfolio, PortfolioConfig};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"debt-payoff-engine — debt amortization and payoff strategy simulation

USAGE:
    debt-payoff-engine <COMMAND> [OPTIONS]

COMMANDS:
    schedule    Month-by-month amortization schedule for one debt
    payment     Fixed monthly payment that retires a debt in N months
    strategies  Summarize and compare payment strategies for one debt
    plan        Simulate avalanche / snowball payoff across several debts
    generate    Generate a random debt portfolio (for testing)
    help        Show this message

OPTIONS (schedule):
    --principal <AMOUNT>  Balance owed
    --rate <PERCENT>      Annual interest rate, e.g. 18.99
    --payment <AMOUNT>    Fixed monthly payment, or
    --months <N>          Target payoff horizon
    --max-months <N>      Month ceiling (default: 1200)
    --start <DATE>        Date of the first payment (YYYY-MM-DD)

OPTIONS (payment):
    --principal <AMOUNT>  Balance owed
    --rate <PERCENT>      Annual interest rate
    --months <N>          Payoff horizon

OPTIONS (strategies):
    --input <FILE>        Path to JSON strategy file
    --baseline <NAME>     Strategy to compare against (default: minimum)

OPTIONS (plan):
    --input <FILE>        Path to JSON debts file
    --budget <AMOUNT>     Total monthly budget for all debts
    --order <ORDER>       avalanche, snowball or both (default: both)
    --max-months <N>      Month ceiling (default: 1200)

OPTIONS (generate):
    --debts <N>           Number of debts (default: 5)
    --output <FILE>       Write to file instead of stdout

COMMON:
    --format <FORMAT>     Output format: text (default) or json

EXAMPLES:
    debt-payoff-engine schedule --principal 5000 --rate 22 --payment 285
    debt-payoff-engine payment --principal 1200 --rate 0 --months 12
    debt-payoff-engine generate --debts 4 --output debts.json
    debt-payoff-engine plan --input debts.json --budget 1500 --order avalanche"#
    );
}

/// JSON schema for the `strategies` input file.
#[derive(serde::Deserialize)]
struct StrategiesFile {
    principal: Decimal,
    annual_rate: Decimal,
    /// Used to build the standard presets when `strategies` is absent.
    #[serde(default)]
    minimum_payment: Option<Decimal>,
    #[serde(default)]
    strategies: Option<Vec<StrategyDefinition>>,
    #[serde(default)]
    config: EngineConfig,
}

/// JSON schema for a debt in the `plan` input file.
#[derive(serde::Deserialize, serde::Serialize)]
struct DebtInput {
    id: String,
    principal: Decimal,
    annual_rate: Decimal,
    #[serde(default)]
    minimum_payment: Decimal,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct DebtsFile {
    debts: Vec<DebtInput>,
    #[serde(default)]
    config: EngineConfig,
}

fn exit_with(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Collect `--key value` pairs, rejecting anything not in `allowed`.
fn parse_options(args: &[String], allowed: &[&str]) -> HashMap<String, String> {
    let mut options = HashMap::new();
    let mut i = 0;
    while i < args.len() {
        let key = args[i].as_str();
        if !allowed.contains(&key) {
            exit_with(format!("unknown option: {}", key));
        }
        i += 1;
        let value = args
            .get(i)
            .cloned()
            .unwrap_or_else(|| exit_with(format!("{} requires a value", key)));
        options.insert(key.trim_start_matches("--").to_string(), value);
        i += 1;
    }
    options
}

fn required<'a>(options: &'a HashMap<String, String>, key: &str) -> &'a str {
    options
        .get(key)
        .map(String::as_str)
        .unwrap_or_else(|| exit_with(format!("--{} is required", key)))
}

fn parse_value<T>(key: &str, raw: &str) -> T
where
    T: std::str::FromStr,
    T::Err: Display,
{
    raw.parse()
        .unwrap_or_else(|e| exit_with(format!("invalid --{} '{}': {}", key, raw, e)))
}

fn json_output(options: &HashMap<String, String>) -> bool {
    match options.get("format").map(String::as_str) {
        None | Some("text") => false,
        Some("json") => true,
        Some(other) => exit_with(format!("--format must be 'text' or 'json', got '{}'", other)),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| exit_with(e));
    println!("{}", json);
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with(format!("reading file '{}': {}", path, e)));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with(format!("parsing JSON in '{}': {}", path, e)))
}

fn cmd_schedule(args: &[String]) {
    let options = parse_options(
        args,
        &[
            "--principal",
            "--rate",
            "--payment",
            "--months",
            "--max-months",
            "--start",
            "--format",
        ],
    );
    let principal: Decimal = parse_value("principal", required(&options, "principal"));
    let rate: Decimal = parse_value("rate", required(&options, "rate"));

    let mut config = EngineConfig::default();
    if let Some(raw) = options.get("max-months") {
        config = config.with_max_months(parse_value("max-months", raw));
    }
    let engine = AmortizationEngine::new(config);

    let payment = match (options.get("payment"), options.get("months")) {
        (Some(raw), None) => parse_value("payment", raw),
        (None, Some(raw)) => {
            let months: u32 = parse_value("months", raw);
            engine
                .fixed_payment(principal, rate, months)
                .unwrap_or_else(|e| exit_with(e))
        }
        _ => exit_with("exactly one of --payment or --months is required"),
    };

    let schedule = engine
        .compute_schedule(principal, rate, payment)
        .unwrap_or_else(|e| exit_with(e));

    if json_output(&options) {
        print_json(&schedule);
        return;
    }

    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>14}",
        "Month", "Payment", "Interest", "Principal", "Balance"
    );
    for r in schedule.records() {
        println!(
            "{:>5} {:>12} {:>12} {:>12} {:>14}",
            r.month,
            r.payment.round_dp(2),
            r.interest.round_dp(2),
            r.principal.round_dp(2),
            r.balance.round_dp(2)
        );
    }

    println!();
    println!("Monthly Payment: {}", payment.round_dp(2));
    println!("Total Paid:      {}", schedule.total_paid().round_dp(2));
    println!("Total Interest:  {}", schedule.total_interest().round_dp(2));
    if schedule.is_saturated() {
        println!(
            "Not paid off within {} months; {} still owed.",
            schedule.max_months(),
            schedule.final_balance().round_dp(2)
        );
    } else {
        println!("Paid Off In:     {} months", schedule.len());
    }
    if let Some(raw) = options.get("start") {
        let start: NaiveDate = parse_value("start", raw);
        if let Some(date) = schedule.payoff_date(start) {
            println!("Payoff Date:     {}", date);
        }
    }
}

fn cmd_payment(args: &[String]) {
    let options = parse_options(args, &["--principal", "--rate", "--months", "--format"]);
    let principal: Decimal = parse_value("principal", required(&options, "principal"));
    let rate: Decimal = parse_value("rate", required(&options, "rate"));
    let months: u32 = parse_value("months", required(&options, "months"));

    let payment = AmortizationEngine::default()
        .fixed_payment(principal, rate, months)
        .unwrap_or_else(|e| exit_with(e))
        .round_dp_with_strategy(2, RoundingStrategy::AwayFromZero);

    if json_output(&options) {
        print_json(&serde_json::json!({
            "principal": principal,
            "annual_rate": rate,
            "months": months,
            "monthly_payment": payment,
        }));
    } else {
        println!("{}", payment);
    }
}

fn cmd_strategies(args: &[String]) {
    let options = parse_options(args, &["--input", "--baseline", "--format"]);
    let file: StrategiesFile = read_json(required(&options, "input"));

    let strategies = match (file.strategies, file.minimum_payment) {
        (Some(definitions), _) => StrategySet::from_definitions(definitions),
        (None, Some(minimum)) => StrategySet::standard(minimum),
        (None, None) => exit_with("input needs either 'strategies' or 'minimum_payment'"),
    }
    .unwrap_or_else(|e| exit_with(e));

    let engine = AmortizationEngine::new(file.config);
    let report = engine
        .summarize_strategies(file.principal, file.annual_rate, &strategies)
        .unwrap_or_else(|e| exit_with(e));

    let baseline = options
        .get("baseline")
        .cloned()
        .or_else(|| strategies.get(MINIMUM).map(|_| MINIMUM.to_string()))
        .or_else(|| strategies.iter().next().map(|(name, _)| name.to_string()));
    let comparison = baseline.map(|name| {
        StrategyComparison::against(&report, &name).unwrap_or_else(|e| exit_with(e))
    });

    if json_output(&options) {
        print_json(&serde_json::json!({
            "report": report,
            "comparison": comparison,
        }));
    } else {
        println!("{}", report);
        if let Some(comparison) = comparison {
            println!("{}", comparison);
        }
    }
}

fn load_portfolio(file: DebtsFile) -> (DebtPortfolio, EngineConfig) {
    let mut portfolio = DebtPortfolio::new();
    for input in file.debts {
        let debt = Debt::new(DebtId::new(&input.id), input.principal, input.annual_rate)
            .and_then(|d| d.with_minimum_payment(input.minimum_payment))
            .unwrap_or_else(|e| exit_with(format!("debt '{}': {}", input.id, e)));
        portfolio.add(debt);
    }
    (portfolio, file.config)
}

fn cmd_plan(args: &[String]) {
    let options = parse_options(
        args,
        &["--input", "--budget", "--order", "--max-months", "--format"],
    );
    let file: DebtsFile = read_json(required(&options, "input"));
    let budget: Decimal = parse_value("budget", required(&options, "budget"));
    let (portfolio, mut config) = load_portfolio(file);
    if let Some(raw) = options.get("max-months") {
        config = config.with_max_months(parse_value("max-months", raw));
    }
    let planner = PayoffPlanner::new(config);
    let json = json_output(&options);

    match options.get("order").map(String::as_str).unwrap_or("both") {
        "both" => {
            let comparison = planner
                .compare(&portfolio, budget)
                .unwrap_or_else(|e| exit_with(e));
            if json {
                print_json(&comparison);
            } else {
                println!("{}", comparison.avalanche);
                println!("{}", comparison.snowball);
                println!(
                    "Avalanche saves {} in interest over snowball.",
                    comparison.avalanche_interest_savings().round_dp(2)
                );
            }
        }
        raw => {
            let order: PayoffOrder = parse_value("order", raw);
            let plan = planner
                .plan(&portfolio, budget, order)
                .unwrap_or_else(|e| exit_with(e));
            if json {
                print_json(&plan);
            } else {
                println!("{}", plan);
            }
        }
    }
}

fn cmd_generate(args: &[String]) {
    let options = parse_options(args, &["--debts", "--output"]);
    let mut config = PortfolioConfig::default();
    if let Some(raw) = options.get("debts") {
        config.debt_count = parse_value("debts", raw);
    }

    let portfolio = generate_random_portfolio(&config).unwrap_or_else(|e| exit_with(e));
    let output = DebtsFile {
        debts: portfolio
            .debts()
            .iter()
            .map(|d| DebtInput {
                id: d.id().to_string(),
                principal: d.principal(),
                annual_rate: d.annual_rate().percent(),
                minimum_payment: d.minimum_payment(),
            })
            .collect(),
        config: EngineConfig::default(),
    };
    let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| exit_with(e));

    if let Some(path) = options.get("output") {
        fs::write(path, &json)
            .unwrap_or_else(|e| exit_with(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} debts totalling {} → {}",
            portfolio.len(),
            portfolio.total_principal(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "schedule" => cmd_schedule(rest),
        "payment" => cmd_payment(rest),
        "strategies" => cmd_strategies(rest),
        "plan" => cmd_plan(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
