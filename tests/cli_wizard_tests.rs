mod common;

use common::{trailing_json, Harness};
use predicates::str::contains;

const OFFER_ANSWERS: [&str; 15] = [
    "64f0c2a1",
    "Firmware Engineer",
    "<BLANK>",
    "4",
    "on campus",
    "placement",
    "Core",
    "600000",
    "900000",
    "7.5",
    "1",
    "2025, 2026",
    "ECE",
    "C, Rust",
    "yes",
];

#[test]
fn offer_dry_run_prints_payload() {
    let harness = Harness::new();
    let output = harness
        .scripted(&OFFER_ANSWERS)
        .args(["offer", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let payload = trailing_json(&output.stdout);
    insta::assert_json_snapshot!(payload, @r###"
    {
      "company": "64f0c2a1",
      "criteria": {
        "branch": "ECE",
        "max_backlog": 1,
        "min_result": 7.5,
        "passout_year": [
          2025,
          2026
        ]
      },
      "drive": "on campus",
      "role": "Firmware Engineer",
      "salary": {
        "max": 900000,
        "min": 600000
      },
      "sector": "Core",
      "skills": [
        "C",
        "Rust"
      ],
      "total_opening": 4,
      "type": "placement"
    }
    "###);
}

#[test]
fn invalid_answer_is_reported_and_asked_again() {
    let harness = Harness::new();
    let mut answers = OFFER_ANSWERS.to_vec();
    answers.insert(3, "many");
    let output = harness
        .scripted(&answers)
        .args(["offer", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Enter a whole number"));
    assert_eq!(trailing_json(&output.stdout)["total_opening"], 4);
}

#[test]
fn exhausted_script_cancels_without_sending() {
    let harness = Harness::new();
    harness
        .scripted(&["Acme"])
        .args(["company", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Company wizard cancelled"));
}

#[test]
fn profile_requires_sign_in() {
    let harness = Harness::new();
    harness
        .scripted(&["Asha"])
        .arg("profile")
        .assert()
        .failure()
        .code(3)
        .stderr(contains("Sign in first"));
}

#[test]
fn profile_dry_run_builds_nested_payload() {
    let harness = Harness::new();
    let mut answers = vec![
        "<KEEP>",
        "EN2019042",
        "2001-04-05",
        "9876543210",
        "Female",
        "General",
        "12 MG Road",
        "Navrangpura",
        "Ahmedabad",
        "Gujarat",
        "India",
        "380009",
        "2020",
    ];
    answers.extend(["8.0"; 8]);
    answers.extend(["88", "2014", "Diploma"]);
    answers.extend(["7.5"; 6]);
    answers.extend(["2017", "0", "yes"]);

    let output = harness
        .signed_in(&answers)
        .args(["profile", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let payload = trailing_json(&output.stdout);
    assert_eq!(payload["googleId"], "google-oauth2|1048");
    assert_eq!(payload["name"], "Asha Patel");
    assert_eq!(payload["email"], "asha@example.edu");
    assert_eq!(payload["address"]["pincode"], 380009);

    let result = &payload["academic_details"]["result"];
    assert!(result.get("hsc").is_none());
    assert_eq!(result["diploma"]["completion_year"], 2017);
    assert_eq!(result["diploma"]["result"]["sem6"], 7.5);
    assert_eq!(result["degree"]["result"].as_object().unwrap().len(), 8);
    assert_eq!(result["degree"]["backlogs"], 0);
}

#[test]
fn submission_failure_exits_with_transport_code() {
    let harness = Harness::new();
    let mut answers = OFFER_ANSWERS.to_vec();
    answers.push("no");
    harness
        .scripted(&answers)
        .arg("offer")
        .assert()
        .failure()
        .code(5)
        .stderr(contains("Submission failed"));
}
