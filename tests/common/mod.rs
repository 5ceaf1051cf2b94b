use virial::{Parameters, VirialCalculator, VirialError};

pub struct TestCase<'a> {
    pub name: &'a str,
    pub parameters: Parameters,
    pub expected: f64,
}

pub fn run_group_test<F>(group_name: &str, cases: Vec<TestCase>, compute: F, group_max_limit: f64)
where
    F: Fn(&VirialCalculator) -> Result<f64, VirialError>,
{
    let mut group_max_error = 0.0;

    println!("\nRunning Group Test: {}", group_name);
    println!("{:-<80}", "");
    println!(
        "{:<24} | {:<16} | {:<16} | {:<10}",
        "Model", "Expected", "Calculated", "Error"
    );

    for case in &cases {
        let calculator = VirialCalculator::new(&case.parameters);
        let calculated = compute(&calculator).expect("Calculation failed");
        let error = (calculated - case.expected).abs();

        println!(
            "{:<24} | {:<16.10} | {:<16.10} | {:<10.3e}",
            case.name, case.expected, calculated, error
        );

        if error > group_max_error {
            group_max_error = error;
        }
    }

    println!("{:-<80}", "");
    println!("Group Statistics for '{}':", group_name);
    println!("  Total Cases:     {}", cases.len());
    println!(
        "  Group Max Error: {:.3e} (Limit: {:.3e})",
        group_max_error, group_max_limit
    );
    println!("{:-<80}\n", "");

    assert!(
        group_max_error <= group_max_limit,
        "Group maximum error {:.3e} exceeds limit {:.3e}",
        group_max_error,
        group_max_limit
    );
}
