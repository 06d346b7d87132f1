use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use klinik_core::{FieldErrors, PainScale, Queue, Symptom};
use klinik_wire::{queue as queue_wire, screening as screening_wire, VitalSignsForm, WireError};

#[derive(Parser)]
#[command(name = "klinik")]
#[command(about = "Clinic triage and patient-flow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a triage level from intake readings
    Triage {
        /// Systolic blood pressure (mmHg)
        systolic: String,
        /// Diastolic blood pressure (mmHg)
        diastolic: String,
        /// Body temperature (°C)
        temperature: String,
        /// Pulse (bpm)
        pulse: String,
        /// Respiratory rate (breaths/min)
        respiratory_rate: String,
        /// Oxygen saturation (%)
        oxygen_saturation: String,
        /// Pain rating 0-10
        #[arg(long, default_value = "0")]
        pain_scale: String,
        /// Comma-separated symptom labels, e.g. "Demam,Batuk"
        #[arg(long)]
        symptoms: Option<String>,
    },
    /// Validate a screening submission JSON file
    CheckScreening {
        /// Path to the submission JSON
        file: PathBuf,
    },
    /// Replay call-next over a queue roster JSON file
    QueueDemo {
        /// Path to the queue entries JSON array
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Triage {
            systolic,
            diastolic,
            temperature,
            pulse,
            respiratory_rate,
            oxygen_saturation,
            pain_scale,
            symptoms,
        }) => {
            let form = VitalSignsForm {
                blood_pressure_systolic: systolic,
                blood_pressure_diastolic: diastolic,
                temperature,
                pulse,
                respiratory_rate,
                oxygen_saturation,
                weight: String::new(),
                height: String::new(),
            };

            let mut errors = FieldErrors::new();
            let vitals = match form.parse() {
                Ok(vitals) => Some(vitals),
                Err(vitals_errors) => {
                    errors.merge(vitals_errors);
                    None
                }
            };
            let pain = pain_scale
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|value| PainScale::new(value).ok());
            let pain = match pain {
                Some(pain) => Some(pain),
                None => {
                    errors.push("pain_scale", "pain scale must be between 0 and 10");
                    None
                }
            };

            match (vitals, pain) {
                (Some(vitals), Some(pain)) => {
                    let symptoms: BTreeSet<Symptom> = symptoms
                        .as_deref()
                        .unwrap_or_default()
                        .split(',')
                        .map(str::trim)
                        .filter(|label| !label.is_empty())
                        .map(Symptom::from_label)
                        .collect();
                    let level = klinik_core::classify(&vitals, pain, &symptoms);
                    println!("Triage level: {level}");
                }
                _ => {
                    print_field_errors(&errors);
                }
            }
        }
        Some(Commands::CheckScreening { file }) => {
            let json_text = std::fs::read_to_string(&file)?;
            match screening_wire::parse(&json_text) {
                Ok(record) => {
                    println!("Screening for patient {} is valid.", record.patient_id());
                    println!("Chief complaint: {}", record.chief_complaint());
                    println!("Triage level: {}", record.triage_level());
                }
                Err(WireError::Validation(errors)) => {
                    print_field_errors(&errors);
                }
                Err(e) => eprintln!("Error reading screening: {e}"),
            }
        }
        Some(Commands::QueueDemo { file }) => {
            let json_text = std::fs::read_to_string(&file)?;
            match queue_wire::parse_entries(&json_text) {
                Ok(entries) => {
                    let mut queue = Queue::with_entries(entries);
                    println!("Roster:");
                    for entry in queue.entries() {
                        println!(
                            "  #{} patient {} [{}] {}",
                            entry.queue_number, entry.patient_id, entry.priority, entry.status
                        );
                    }
                    let called = queue.call_next().map(|entry| (entry.id, entry.queue_number));
                    match called {
                        Some((id, number)) => {
                            println!("Calling #{number}");
                            queue.complete(id)?;
                            println!("Completed #{number}");
                        }
                        None => println!("No patient waiting."),
                    }
                    println!("After:");
                    for entry in queue.entries() {
                        println!("  #{} [{}]", entry.queue_number, entry.status);
                    }
                }
                Err(e) => eprintln!("Error reading queue roster: {e}"),
            }
        }
        None => {
            println!("Use 'klinik --help' for commands");
        }
    }

    Ok(())
}

fn print_field_errors(errors: &FieldErrors) {
    eprintln!("Validation failed:");
    for (field, messages) in errors.iter() {
        for message in messages {
            eprintln!("  {field}: {message}");
        }
    }
}
