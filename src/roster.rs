//! In-memory student roster with grade entry and aggregate statistics.

use std::fmt;

/// Highest grade a student can receive.
pub const MAX_GRADE: u8 = 100;

/// Token that ends a grade entry loop.
pub const DONE_TOKEN: &str = "done";

/// Errors raised by roster operations.
///
/// Every variant is recoverable: the menu reports it and carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A student with this name is already on the roster.
    DuplicateName(String),
    /// No student with this name.
    StudentNotFound(String),
    /// Grade token is not a string of decimal digits.
    InvalidFormat(String),
    /// Grade token is numeric but outside 0-100.
    OutOfRange(String),
    /// The roster has no students.
    EmptyRoster,
    /// No student has any grade recorded.
    NoGrades,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::DuplicateName(name) => write!(f, "Student '{}' already exists.", name),
            RosterError::StudentNotFound(name) => write!(f, "Student '{}' not found.", name),
            RosterError::InvalidFormat(_) => write!(f, "Invalid input. Grade must be a number."),
            RosterError::OutOfRange(_) => {
                write!(f, "Invalid input. Grade must be between 0 and {}.", MAX_GRADE)
            }
            RosterError::EmptyRoster => write!(f, "Student list is empty."),
            RosterError::NoGrades => write!(f, "No students have grades recorded."),
        }
    }
}

impl std::error::Error for RosterError {}

/// Outcome of a single grade token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeEntry {
    /// The sentinel: stop asking for grades.
    Done,
    /// A valid grade.
    Grade(u8),
}

/// Parse one raw grade token.
///
/// The token is trimmed and lowercased first, so " DONE " ends entry.
pub fn parse_grade(raw: &str) -> Result<GradeEntry, RosterError> {
    let token = raw.trim().to_lowercase();

    if token == DONE_TOKEN {
        return Ok(GradeEntry::Done);
    }

    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(RosterError::InvalidFormat(token));
    }

    // All digits: a parse failure can only mean the value overflowed
    match token.parse::<u32>() {
        Ok(value) if value <= u32::from(MAX_GRADE) => Ok(GradeEntry::Grade(value as u8)),
        _ => Err(RosterError::OutOfRange(token)),
    }
}

/// Arithmetic mean of `grades`, or 0.0 when there are none.
pub fn average(grades: &[u8]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let sum: u64 = grades.iter().map(|&g| u64::from(g)).sum();
    sum as f64 / grades.len() as f64
}

/// A student and the grades recorded for them, in entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    name: String,
    grades: Vec<u8>,
}

impl Student {
    fn new(name: String) -> Self {
        Self { name, grades: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grades(&self) -> &[u8] {
        &self.grades
    }

    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }

    /// This student's average, 0.0 with no grades.
    pub fn average(&self) -> f64 {
        average(&self.grades)
    }

    /// Record an already-parsed grade.
    pub fn push_grade(&mut self, grade: u8) -> Result<(), RosterError> {
        if grade > MAX_GRADE {
            return Err(RosterError::OutOfRange(grade.to_string()));
        }
        self.grades.push(grade);
        Ok(())
    }

    /// Parse a raw token and append it if it is a valid grade.
    ///
    /// The sentinel and any error leave the grades untouched.
    pub fn add_grade(&mut self, raw: &str) -> Result<GradeEntry, RosterError> {
        let entry = parse_grade(raw)?;
        if let GradeEntry::Grade(grade) = entry {
            self.push_grade(grade)?;
            log::debug!("Recorded grade {} for {}", grade, self.name);
        }
        Ok(entry)
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub name: String,
    /// `None` when the student has no grades.
    pub average: Option<f64>,
}

/// Group statistics over every student that has at least one grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub max_average: f64,
    pub min_average: f64,
    /// Sum of every grade divided by the number of grades.
    pub overall_average: f64,
}

/// Per-student averages plus group statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    /// `None` when no student has grades.
    pub summary: Option<Summary>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Student Report ---")?;
        for entry in &self.entries {
            match entry.average {
                Some(avg) => writeln!(f, "{}'s average grade is {:.1}", entry.name, avg)?,
                None => writeln!(f, "{}'s average grade is N/A", entry.name)?,
            }
        }
        writeln!(f, "{}", "-".repeat(30))?;
        match &self.summary {
            Some(summary) => {
                writeln!(f, "Max average: {:.1}", summary.max_average)?;
                writeln!(f, "Min average: {:.1}", summary.min_average)?;
                writeln!(f, "Overall average: {:.1}", summary.overall_average)?;
            }
            None => writeln!(f, "No grades available to calculate statistics.")?,
        }
        writeln!(f, "{}", "-".repeat(27))
    }
}

/// The student with the highest average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopPerformer<'a> {
    pub student: &'a Student,
    pub average: f64,
}

impl fmt::Display for TopPerformer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Top Performer ---")?;
        writeln!(f, "Name: {}", self.student.name())?;
        writeln!(f, "Average Grade: {:.1}", self.average)?;
        writeln!(f, "{}", "-".repeat(23))
    }
}

/// Insertion-ordered set of students with unique names.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Students in insertion order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Add a student with no grades. The name is trimmed first.
    pub fn add_student(&mut self, name: &str) -> Result<&Student, RosterError> {
        let name = name.trim();
        if self.find_student(name).is_some() {
            return Err(RosterError::DuplicateName(name.to_string()));
        }

        log::info!("Adding student {:?}", name);
        self.students.push(Student::new(name.to_string()));
        Ok(&self.students[self.students.len() - 1])
    }

    pub fn find_student(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name == name)
    }

    pub fn find_student_mut(&mut self, name: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.name == name)
    }

    /// Build the per-student and group report.
    pub fn report(&self) -> Result<Report, RosterError> {
        if self.students.is_empty() {
            return Err(RosterError::EmptyRoster);
        }

        let mut entries = Vec::with_capacity(self.students.len());
        let mut averages = Vec::new();
        let mut grade_sum: u64 = 0;
        let mut grade_count: usize = 0;

        for student in &self.students {
            if !student.has_grades() {
                entries.push(ReportEntry {
                    name: student.name.clone(),
                    average: None,
                });
                continue;
            }

            let avg = student.average();
            entries.push(ReportEntry {
                name: student.name.clone(),
                average: Some(avg),
            });
            averages.push(avg);
            grade_sum += student.grades.iter().map(|&g| u64::from(g)).sum::<u64>();
            grade_count += student.grades.len();
        }

        let summary = if averages.is_empty() {
            None
        } else {
            Some(Summary {
                max_average: averages.iter().copied().fold(f64::MIN, f64::max),
                min_average: averages.iter().copied().fold(f64::MAX, f64::min),
                overall_average: grade_sum as f64 / grade_count as f64,
            })
        };

        Ok(Report { entries, summary })
    }

    /// Find the student with the highest average.
    ///
    /// Ties go to whoever was added first.
    pub fn top_performer(&self) -> Result<TopPerformer<'_>, RosterError> {
        if self.students.is_empty() {
            return Err(RosterError::EmptyRoster);
        }

        let mut best: Option<TopPerformer<'_>> = None;
        for student in self.students.iter().filter(|s| s.has_grades()) {
            let avg = student.average();
            match best {
                Some(current) if avg <= current.average => {}
                _ => {
                    best = Some(TopPerformer {
                        student,
                        average: avg,
                    })
                }
            }
        }

        best.ok_or(RosterError::NoGrades)
    }
}
