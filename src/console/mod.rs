//! Interactive menu
//!
//! A read loop mapping a numbered choice to one record operation. Every
//! operation reloads the store, so edits made outside the program between
//! choices are picked up. Failures inside an operation are reported and the
//! loop carries on; only an interrupt or end of input leaves it.

pub mod input;
pub mod menu;
pub mod render;

use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{parse_age, parse_grade, validate_name, InputError};
use crate::operations::{self, RecordUpdate};
use crate::store::RecordStore;
use crate::types::{format_grade, SortKey, SortOrder, StudentRecord};

pub use input::{EditorInput, Input, LineSource, ReaderInput};
pub use menu::MenuChoice;
pub use render::Printer;

const MENU_PROMPT: &str = "Enter your choice (1-8): ";

/// Menu loop over one store
pub struct Controller<I: LineSource, W: Write> {
    store: RecordStore,
    input: I,
    out: Printer<W>,
}

impl<I: LineSource, W: Write> Controller<I, W> {
    pub fn new(store: RecordStore, input: I, out: Printer<W>) -> Self {
        Self { store, input, out }
    }

    /// Hand back the printer, mostly so tests can read what was written
    pub fn into_printer(self) -> Printer<W> {
        self.out
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        info!("{} menu on {}", crate::info(), self.store.path().display());

        loop {
            self.out.menu()?;

            let choice = match self.prompt(MENU_PROMPT) {
                Ok(choice) => choice,
                Err(e) => {
                    self.finish_on(e)?;
                    break;
                }
            };

            let Some(choice) = MenuChoice::parse(&choice) else {
                self.out.error("Invalid choice. Please enter a number between 1 and 8.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                self.out.success("Exiting program... Goodbye!")?;
                break;
            }

            debug!("Menu choice {:?}", choice);
            if let Err(e) = self.dispatch(choice) {
                if is_interrupt(&e) {
                    self.finish_on(e)?;
                    break;
                }
                match e.downcast_ref::<InputError>() {
                    Some(input_err) => {
                        let text = format!("Error: {}", input_err);
                        self.out.error(&text)?;
                    }
                    None => {
                        warn!("{} failed: {:#}", choice.label(), e);
                        self.out.error(&format!("Unexpected error: {:#}", e))?;
                    }
                }
            }
        }

        info!("Menu stopped");
        Ok(())
    }

    /// Report why the loop is ending. Read failures other than interrupt or
    /// end of input (a broken terminal or stdin) are shown too, never raised.
    fn finish_on(&mut self, e: anyhow::Error) -> Result<()> {
        if is_interrupt(&e) {
            self.out.info("Program interrupted by user. Exiting safely...")?;
        } else {
            warn!("Input failed: {:#}", e);
            self.out.error(&format!("Error: {:#}", e))?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::View => self.view(),
            MenuChoice::Search => self.search(),
            MenuChoice::Update => self.update(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Sorted => self.sorted(),
            MenuChoice::Statistics => self.statistics(),
            MenuChoice::Exit => Ok(()),
        }
    }

    /// Read one answer, trimmed. Interrupt and end of input both surface as
    /// `InputError::Interrupted`.
    fn prompt(&mut self, text: &str) -> Result<String> {
        if !self.input.shows_prompt() {
            self.out.prompt(text)?;
        }
        match self.input.read_line(text)? {
            Input::Line(line) => Ok(line.trim().to_string()),
            Input::Interrupted | Input::Eof => {
                if !self.input.shows_prompt() {
                    self.out.line("")?;
                }
                Err(InputError::Interrupted.into())
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        let name = validate_name(&self.prompt("Enter student name: ")?)?;
        let age = parse_age(&self.prompt("Enter age: ")?)?;
        let grade = parse_grade(&self.prompt("Enter grade: ")?)?;

        let record = StudentRecord::new(name, age, grade);
        self.store.append(&record)?;
        info!("Added student '{}'", record.name);
        self.out.success(&format!("Student '{}' added successfully.", record.name))?;
        Ok(())
    }

    fn view(&mut self) -> Result<()> {
        let records = self.store.load()?;
        if records.is_empty() {
            self.out.info("No students found.")?;
            return Ok(());
        }
        self.out.table("Student Records", &records)?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let query = self.prompt("Enter student name to search: ")?;
        if query.is_empty() {
            return Err(InputError::EmptyQuery.into());
        }

        let records = self.store.load()?;
        let found = operations::search(&records, &query);
        if found.is_empty() {
            self.out.info(&format!("No student found matching '{}'.", query))?;
        } else {
            self.out.matches(&found)?;
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let target = self.prompt("Enter the exact student name to update: ")?;
        if target.is_empty() {
            return Err(InputError::EmptyName.into());
        }

        let mut records = self.store.load()?;
        let Some(idx) = operations::find_exact(&records, &target) else {
            self.out.info(&format!("No student found with the name '{}'.", target))?;
            return Ok(());
        };
        let current = records[idx].clone();

        self.out.info("Leave a field blank to keep the current value.")?;
        let new_name = self.prompt(&format!("New name [{}]: ", current.name))?;
        let new_age = self.prompt(&format!("New age [{}]: ", current.age))?;
        let new_grade = self.prompt(&format!("New grade [{}]: ", format_grade(current.grade)))?;

        let update = match build_update(&new_name, &new_age, &new_grade) {
            Ok(update) => update,
            Err(e) => {
                debug!("Update of '{}' cancelled: {}", current.name, e);
                self.out.error(&format!("{} Update cancelled.", e))?;
                return Ok(());
            }
        };

        if let Some(updated) = operations::update_first(&mut records, &target, update) {
            self.store.save(&records)?;
            info!("Updated '{}' -> {:?}", current.name, updated);
            self.out.success("Student updated successfully.")?;
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let target = self.prompt("Enter the exact student name to delete: ")?;
        if target.is_empty() {
            return Err(InputError::EmptyName.into());
        }

        let mut records = self.store.load()?;
        match operations::delete_first(&mut records, &target) {
            Some(removed) => {
                self.store.save(&records)?;
                info!("Deleted student '{}'", removed.name);
                self.out.success(&format!("Student '{}' deleted successfully.", removed.name))?;
            }
            None => {
                self.out.info(&format!("No student found with the name '{}'.", target))?;
            }
        }
        Ok(())
    }

    fn sorted(&mut self) -> Result<()> {
        let mut records = self.store.load()?;
        if records.is_empty() {
            self.out.info("No students found.")?;
            return Ok(());
        }

        let key: SortKey = self.prompt("Sort by (name/age/grade): ")?.parse()?;
        let order = SortOrder::from_answer(&self.prompt("Order (asc/desc) [asc]: ")?);

        operations::sort_records(&mut records, key, order);
        self.out.table("Sorted Students", &records)?;
        Ok(())
    }

    fn statistics(&mut self) -> Result<()> {
        let records = self.store.load()?;
        match operations::statistics(&records) {
            Some(stats) => self.out.statistics(&stats)?,
            None => self.out.info("No students found.")?,
        }
        Ok(())
    }
}

fn is_interrupt(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<InputError>(), Some(InputError::Interrupted))
}

/// Blank answers keep the current value; anything else must be valid.
fn build_update(name: &str, age: &str, grade: &str) -> Result<RecordUpdate, InputError> {
    let mut update = RecordUpdate::default();
    if !name.trim().is_empty() {
        update.name = Some(validate_name(name)?);
    }
    if !age.trim().is_empty() {
        update.age = Some(parse_age(age)?);
    }
    if !grade.trim().is_empty() {
        update.grade = Some(parse_grade(grade)?);
    }
    Ok(update)
}

/// Run the menu on stdin/stdout. A terminal gets line editing; piped input
/// is read line by line.
pub fn run(config: &Config) -> Result<()> {
    let store = RecordStore::new(&config.store.path);
    let stdout = io::stdout();

    // Redirected output should stay free of escape codes
    let display = config.display.for_output(stdout.is_terminal());
    let printer = Printer::new(stdout.lock(), &display);

    if io::stdin().is_terminal() {
        Controller::new(store, EditorInput::new()?, printer).run()
    } else {
        let input = ReaderInput::new(io::stdin().lock());
        Controller::new(store, input, printer).run()
    }
}
