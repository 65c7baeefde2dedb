//! Line-based menu over a reader/writer pair.
//!
//! Each action prompts for its fields one line at a time, validates numeric
//! input, calls the clinic, and prints the outcome. End of input exits.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;
use vet_clinic_core::clock::parse_date_time;
use vet_clinic_core::{Clinic, Diagnosis};

const OPTIONS: &[(&str, &str)] = &[
    ("1", "Register new animal"),
    ("2", "Schedule appointment"),
    ("3", "Admit animal"),
    ("4", "Discharge animal"),
    ("5", "Check animal status"),
    ("6", "Add staff member"),
    ("7", "Restock inventory"),
    ("8", "Generate monthly report"),
    ("9", "Emergency admission"),
    ("10", "Add treatment"),
    ("11", "Export billing"),
    ("0", "Exit"),
];

pub struct Menu<'c, R, W> {
    clinic: &'c mut Clinic,
    input: R,
    out: W,
    eof: bool,
}

impl<'c, R: BufRead, W: Write> Menu<'c, R, W> {
    pub fn new(clinic: &'c mut Clinic, input: R, out: W) -> Self {
        Self {
            clinic,
            input,
            out,
            eof: false,
        }
    }

    /// Show the menu until the user exits or input ends.
    pub fn run(mut self) -> anyhow::Result<()> {
        loop {
            self.show_menu()?;
            let choice = self.prompt("Select an option: ")?;
            if self.eof {
                break;
            }
            debug!(choice = %choice, "menu selection");

            match choice.as_str() {
                "1" => self.register_animal()?,
                "2" => self.schedule_appointment()?,
                "3" => self.admit_animal()?,
                "4" => self.discharge_animal()?,
                "5" => self.check_animal_status()?,
                "6" => self.add_staff_member()?,
                "7" => self.restock_inventory()?,
                "8" => self.generate_monthly_report()?,
                "9" => self.emergency_admission()?,
                "10" => self.add_treatment()?,
                "11" => self.export_billing()?,
                "0" => break,
                _ => writeln!(self.out, "Invalid option")?,
            }
            if self.eof {
                break;
            }
        }
        writeln!(self.out, "\nGoodbye!")?;
        Ok(())
    }

    fn show_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "\n=== Animal Clinic Management ===")?;
        for (key, label) in OPTIONS {
            writeln!(self.out, "{}. {}", key, label)?;
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line. Empty at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<String> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
        }
        Ok(line.trim().to_string())
    }

    /// Prompt for a number, printing `Invalid <what>` when it does not parse.
    fn prompt_number<T: FromStr>(&mut self, label: &str, what: &str) -> anyhow::Result<Option<T>> {
        let raw = self.prompt(label)?;
        match raw.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                if !self.eof {
                    writeln!(self.out, "Invalid {}: {:?}", what, raw)?;
                }
                Ok(None)
            }
        }
    }

    fn register_animal(&mut self) -> anyhow::Result<()> {
        let name = self.prompt("Animal name: ")?;
        let species = self.prompt("Species: ")?;
        let Some(age) = self.prompt_number::<u32>("Age: ", "age")? else {
            return Ok(());
        };
        let owner = self.prompt("Owner name: ")?;
        if self.eof {
            return Ok(());
        }

        let id = self.clinic.register_animal(name, species, age, owner);
        writeln!(self.out, "Registered successfully! Animal ID: {}", id)?;
        Ok(())
    }

    fn schedule_appointment(&mut self) -> anyhow::Result<()> {
        let animal_id = self.prompt("Animal ID: ")?;
        let raw_date = self.prompt("Date (YYYY-MM-DD): ")?;
        let procedure = self.prompt("Procedure: ")?;
        if self.eof {
            return Ok(());
        }
        let Some(date) = parse_date_time(&raw_date) else {
            writeln!(self.out, "Invalid date: {:?}", raw_date)?;
            return Ok(());
        };

        match self.clinic.schedule_appointment(&animal_id, date, &procedure) {
            Ok(id) => writeln!(self.out, "Appointment scheduled! ID: {}", id)?,
            Err(e) => writeln!(self.out, "Failed to schedule appointment: {}", e)?,
        }
        Ok(())
    }

    fn admit_animal(&mut self) -> anyhow::Result<()> {
        let animal_id = self.prompt("Animal ID: ")?;
        let condition = self.prompt("Diagnosis: ")?;
        if self.eof {
            return Ok(());
        }
        // Medicine is drawn from the animal's own species
        let species = self
            .clinic
            .animal(&animal_id)
            .map(|a| a.species.clone())
            .unwrap_or_default();

        match self
            .clinic
            .admit_animal(&animal_id, Diagnosis::new(condition, species))
        {
            Ok(_) => writeln!(self.out, "Animal admitted")?,
            Err(e) => writeln!(self.out, "Admission failed: {}", e)?,
        }
        Ok(())
    }

    fn discharge_animal(&mut self) -> anyhow::Result<()> {
        let animal_id = self.prompt("Animal ID: ")?;
        let final_diagnosis = self.prompt("Final diagnosis: ")?;
        if self.eof {
            return Ok(());
        }

        match self.clinic.discharge_animal(&animal_id, final_diagnosis) {
            Ok(fee) => writeln!(self.out, "Animal discharged. Billed: ${}", fee)?,
            Err(e) => writeln!(self.out, "Discharge failed: {}", e)?,
        }
        Ok(())
    }

    fn check_animal_status(&mut self) -> anyhow::Result<()> {
        let animal_id = self.prompt("Animal ID: ")?;
        if self.eof {
            return Ok(());
        }

        match self.clinic.animal_status(&animal_id) {
            Some(status) => {
                writeln!(self.out, "Name: {}", status.name)?;
                writeln!(self.out, "Status: {}", status.status.as_str())?;
                let last = status
                    .last_procedure
                    .map(|a| a.procedure)
                    .unwrap_or_else(|| "None".to_string());
                writeln!(self.out, "Last procedure: {}", last)?;
            }
            None => writeln!(self.out, "Animal not found")?,
        }
        Ok(())
    }

    fn add_staff_member(&mut self) -> anyhow::Result<()> {
        let name = self.prompt("Staff name: ")?;
        let position = self.prompt("Position: ")?;
        let quals = self.prompt("Qualifications (comma separated): ")?;
        if self.eof {
            return Ok(());
        }

        let qualifications = quals
            .split(',')
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        let id = self.clinic.add_staff_member(name, position, qualifications);
        writeln!(self.out, "Staff added! ID: {}", id)?;
        Ok(())
    }

    fn restock_inventory(&mut self) -> anyhow::Result<()> {
        let species = self.prompt("Species: ")?;
        let item = self.prompt("Item: ")?;
        let Some(quantity) = self.prompt_number::<u64>("Quantity: ", "quantity")? else {
            return Ok(());
        };

        self.clinic.restock_inventory(&species, &item, quantity);
        writeln!(self.out, "Inventory updated")?;
        Ok(())
    }

    fn generate_monthly_report(&mut self) -> anyhow::Result<()> {
        let Some(month) = self.prompt_number::<u32>("Month (0-11): ", "month")? else {
            return Ok(());
        };
        let Some(year) = self.prompt_number::<i32>("Year: ", "year")? else {
            return Ok(());
        };

        let report = self.clinic.generate_monthly_report(month, year);
        writeln!(self.out, "\n=== Monthly Report ===")?;
        writeln!(self.out, "Total appointments: {}", report.total_appointments)?;
        writeln!(self.out, "Revenue: ${}", report.revenue)?;
        writeln!(self.out, "Animals treated: {}", report.animals_treated)?;
        writeln!(self.out, "Top procedures:")?;
        for entry in &report.common_procedures {
            writeln!(self.out, "  {}: {} times", entry.procedure, entry.count)?;
        }
        Ok(())
    }

    fn emergency_admission(&mut self) -> anyhow::Result<()> {
        let name = self.prompt("Animal name: ")?;
        let species = self.prompt("Species: ")?;
        let condition = self.prompt("Condition: ")?;
        if self.eof {
            return Ok(());
        }

        match self.clinic.emergency_admit(name, species, condition) {
            Ok(id) => writeln!(self.out, "Emergency admission! Animal ID: {}", id)?,
            Err(e) => writeln!(self.out, "Emergency admission failed: {}", e)?,
        }
        Ok(())
    }

    fn add_treatment(&mut self) -> anyhow::Result<()> {
        let animal_id = self.prompt("Animal ID: ")?;
        let description = self.prompt("Treatment: ")?;
        let raw_cost = self.prompt("Cost (blank for none): ")?;
        if self.eof {
            return Ok(());
        }
        let cost = if raw_cost.is_empty() {
            None
        } else {
            match raw_cost.parse::<f64>() {
                Ok(c) => Some(c),
                Err(_) => {
                    writeln!(self.out, "Invalid cost: {:?}", raw_cost)?;
                    return Ok(());
                }
            }
        };

        match self.clinic.add_treatment(&animal_id, description, cost) {
            Ok(()) => writeln!(self.out, "Treatment added")?,
            Err(e) => writeln!(self.out, "Failed to add treatment: {}", e)?,
        }
        Ok(())
    }

    fn export_billing(&mut self) -> anyhow::Result<()> {
        let format = self.prompt("Format (json/csv): ")?;
        if self.eof {
            return Ok(());
        }

        let export = self.clinic.export_billing();
        match format.to_ascii_lowercase().as_str() {
            "json" => writeln!(self.out, "{}", export.to_json()?)?,
            "csv" => write!(self.out, "{}", export.to_csv())?,
            other => writeln!(self.out, "Unknown format: {:?}", other)?,
        }
        Ok(())
    }
}
