//! Interactive menu for the grade tracker.

use crate::console::Console;
use crate::roster::{GradeEntry, Roster, RosterError};
use eyre::Result;
use std::io::{BufRead, Write};

const MENU_PROMPT: &str = "\nSelect action:\n\
1. Add a new student\n\
2. Add grades for a student\n\
3. Show report (all students)\n\
4. Find top performer\n\
5. Exit\n\
Your choice: ";

/// One menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddStudent,
    AddGrades,
    Report,
    TopPerformer,
    Exit,
}

impl Command {
    /// Parse a menu token. Surrounding whitespace is ignored.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "1" => Some(Command::AddStudent),
            "2" => Some(Command::AddGrades),
            "3" => Some(Command::Report),
            "4" => Some(Command::TopPerformer),
            "5" => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Whether the menu loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The grade tracker session: a roster plus the console driving it.
pub struct Menu<R, W> {
    roster: Roster,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Start a session with an empty roster.
    pub fn new(input: R, output: W) -> Self {
        Self::with_roster(Roster::new(), input, output)
    }

    pub fn with_roster(roster: Roster, input: R, output: W) -> Self {
        Self {
            roster,
            console: Console::new(input, output),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Tear the session down into its roster and output.
    pub fn into_parts(self) -> (Roster, W) {
        (self.roster, self.console.into_output())
    }

    /// Run until Exit is chosen or input runs out.
    pub fn run(&mut self) -> Result<()> {
        self.console.say("--- Student Grade Manager ---")?;

        loop {
            let Some(choice) = self.console.ask(MENU_PROMPT)? else {
                log::info!("Input closed, leaving grade tracker");
                return Ok(());
            };

            let flow = match Command::parse(&choice) {
                Some(command) => self.dispatch(command)?,
                None => {
                    self.console
                        .say("Invalid choice. Please enter a number from 1 to 5.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute one command.
    pub fn dispatch(&mut self, command: Command) -> Result<Flow> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::AddStudent => self.add_student(),
            Command::AddGrades => self.add_grades(),
            Command::Report => self.show_report(),
            Command::TopPerformer => self.show_top_performer(),
            Command::Exit => {
                self.console.say("Program terminated.")?;
                Ok(Flow::Exit)
            }
        }
    }

    fn add_student(&mut self) -> Result<Flow> {
        self.console.say("--- Add New Student ---")?;
        let Some(name) = self.console.ask("Enter student name: ")? else {
            return Ok(Flow::Exit);
        };

        match self.roster.add_student(&name) {
            Ok(student) => {
                let line = format!("Student '{}' successfully added.", student.name());
                self.console.say(line)?;
            }
            Err(e) => self.console.say(e)?,
        }
        Ok(Flow::Continue)
    }

    fn add_grades(&mut self) -> Result<Flow> {
        if self.roster.is_empty() {
            self.console
                .say("Student list is empty. Please add a student first.")?;
            return Ok(Flow::Continue);
        }

        self.console.say("--- Add Grades ---")?;
        let Some(name) = self.console.ask("Enter student name to add grades: ")? else {
            return Ok(Flow::Exit);
        };
        let name = name.trim().to_string();

        let Some(student) = self.roster.find_student_mut(&name) else {
            self.console.say(RosterError::StudentNotFound(name))?;
            return Ok(Flow::Continue);
        };

        self.console
            .say(format!("Enter grades for {} (0 to 100). Type 'done' to finish.", name))?;
        loop {
            let Some(raw) = self.console.ask("Grade (or 'done'): ")? else {
                return Ok(Flow::Exit);
            };

            match student.add_grade(&raw) {
                Ok(GradeEntry::Done) => break,
                Ok(GradeEntry::Grade(grade)) => self.console.say(format!("Grade {} added.", grade))?,
                Err(e) => self.console.say(e)?,
            }
        }
        Ok(Flow::Continue)
    }

    fn show_report(&mut self) -> Result<Flow> {
        match self.roster.report() {
            Ok(report) => self.console.say(report)?,
            Err(e) => self.console.say(e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_top_performer(&mut self) -> Result<Flow> {
        match self.roster.top_performer() {
            Ok(top) => self.console.say(top)?,
            Err(e) => self.console.say(e)?,
        }
        Ok(Flow::Continue)
    }
}
