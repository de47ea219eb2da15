//! Example demonstrating the Triage processing pipeline
//!
//! This example shows how to:
//! - Parse an HL7v2 message
//! - Run it through the processing pipeline
//! - Work with the resulting outcome and clinical summary
//!
//! Run with:
//! ```bash
//! cargo run --example process_message
//! ```

use triage::core::MessageProcessor;
use triage::domain::MessageSubmission;
use triage::hl7::parse_message;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw = concat!(
        "MSH|^~\\&|EPIC|HOSPITAL|FHIR_BRIDGE|CLOUD|20240115103000||ADT^A01|MSG00001|P|2.5\r",
        "EVN|A01|20240115103000\r",
        "PID|1||PATID1234^5^M11||Doe^John^A||19800101|M|||123 Main St^^Metropolis^IL^62960\r",
        "PV1|1|I|2000^2012^01"
    );

    // Inspect the parsed structure first
    let message = parse_message(raw)?;
    println!("Parsed {} segments", message.segments().len());

    let msh = message.segment("MSH").expect("MSH is always present");
    println!("Sending application: {:?}", msh.field_value(3));
    println!("Message type:        {:?}", msh.field_value(9));
    println!();

    // Run the full pipeline (validate-only: no dispatch handle attached)
    let processor = MessageProcessor::new();
    let submission = MessageSubmission::new("ADT^A01", raw).with_correlation_id("example-001");
    let outcome = processor.process(submission);

    println!("Outcome:");
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let Some(summary) = &outcome.processed_data {
        println!();
        println!(
            "Patient {} ({})",
            summary.patient_info.patient_name.as_deref().unwrap_or("?"),
            summary.patient_info.patient_id.as_deref().unwrap_or("?"),
        );
    }

    println!();
    println!("✅ Processing example completed successfully!");

    Ok(())
}
