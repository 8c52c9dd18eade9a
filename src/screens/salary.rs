//! Salary calculator
//!
//! Pure arithmetic over the entered amounts; nothing is sent to the backend.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{FormError, FormResult};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryField {
    Month,
    Year,
    EmployeeName,
    SalaryAmount,
    OvertimeDays,
    OvertimeRate,
    LeaveTaken,
    LeaveDeduction,
    Bonus,
    Deductions,
}

impl SalaryField {
    pub const ALL: [SalaryField; 10] = [
        SalaryField::Month,
        SalaryField::Year,
        SalaryField::EmployeeName,
        SalaryField::SalaryAmount,
        SalaryField::OvertimeDays,
        SalaryField::OvertimeRate,
        SalaryField::LeaveTaken,
        SalaryField::LeaveDeduction,
        SalaryField::Bonus,
        SalaryField::Deductions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SalaryField::Month => "Month",
            SalaryField::Year => "Year",
            SalaryField::EmployeeName => "Employee Name",
            SalaryField::SalaryAmount => "Salary Amount",
            SalaryField::OvertimeDays => "Overtime Days",
            SalaryField::OvertimeRate => "Overtime Rate",
            SalaryField::LeaveTaken => "Leave Taken (Days)",
            SalaryField::LeaveDeduction => "Leave Deduction per Day",
            SalaryField::Bonus => "Bonus",
            SalaryField::Deductions => "Deductions",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, SalaryField::Month | SalaryField::Year)
    }

    fn text_index(self) -> Option<usize> {
        match self {
            SalaryField::Month | SalaryField::Year => None,
            other => SalaryField::ALL.iter().position(|f| *f == other).map(|i| i - 2),
        }
    }
}

/// Parsed amounts. Optional inputs left blank count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryInput {
    pub salary: Decimal,
    pub overtime_days: Decimal,
    pub overtime_rate: Decimal,
    pub leave_days: Decimal,
    pub leave_rate: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryBreakdown {
    pub overtime: Decimal,
    pub leave_deduction: Decimal,
    pub total: Decimal,
    pub paid_total: Decimal,
}

/// Errors name the figure whose arithmetic overflowed.
pub fn calculate(input: &SalaryInput) -> FormResult<SalaryBreakdown> {
    let overtime = input
        .overtime_days
        .checked_mul(input.overtime_rate)
        .ok_or(FormError::Overflow("Overtime"))?;
    let leave_deduction = input
        .leave_days
        .checked_mul(input.leave_rate)
        .ok_or(FormError::Overflow("Leave deduction"))?;
    let total = input
        .salary
        .checked_add(input.bonus)
        .and_then(|t| t.checked_sub(input.deductions))
        .and_then(|t| t.checked_add(overtime))
        .and_then(|t| t.checked_sub(leave_deduction))
        .ok_or(FormError::Overflow("Total"))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(SalaryBreakdown {
        overtime,
        leave_deduction,
        total,
        paid_total: total,
    })
}

/// Format as Indian Rupees with lakh grouping, e.g. `₹1,23,456.78`.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}₹{}.{}", sign, group_lakh(whole), fraction)
}

/// Last three digits, then groups of two.
fn group_lakh(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[derive(Debug, Clone)]
pub struct SalaryForm {
    pub focus: usize,
    pub month: Option<usize>,
    pub year: Option<i32>,
    pub error: Option<String>,
    years: Vec<i32>,
    texts: [String; 8],
    result: Option<SalaryBreakdown>,
}

impl SalaryForm {
    pub fn new(years: Vec<i32>) -> Self {
        Self {
            focus: 0,
            month: None,
            year: None,
            error: None,
            years,
            texts: Default::default(),
            result: None,
        }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn focused(&self) -> SalaryField {
        SalaryField::ALL[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % SalaryField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(SalaryField::ALL.len() - 1);
    }

    pub fn text(&self, field: SalaryField) -> Option<&str> {
        field.text_index().map(|i| self.texts[i].as_str())
    }

    pub fn set_text(&mut self, field: SalaryField, value: &str) {
        if let Some(i) = field.text_index() {
            self.texts[i] = value.to_string();
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(i) = self.focused().text_index() {
            self.texts[i].push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(i) = self.focused().text_index() {
            self.texts[i].pop();
        }
    }

    /// Step the month or year chooser.
    pub fn cycle(&mut self, direction: isize) {
        match self.focused() {
            SalaryField::Month => self.month = step(self.month, MONTHS.len(), direction),
            SalaryField::Year => {
                let current = self
                    .year
                    .and_then(|y| self.years.iter().position(|candidate| *candidate == y));
                self.year = step(current, self.years.len(), direction).map(|i| self.years[i]);
            }
            _ => {}
        }
    }

    pub fn month_label(&self) -> Option<&'static str> {
        self.month.map(|m| MONTHS[m])
    }

    pub fn input(&self) -> FormResult<SalaryInput> {
        if self.month.is_none() {
            return Err(FormError::Required(SalaryField::Month.label()));
        }
        if self.year.is_none() {
            return Err(FormError::Required(SalaryField::Year.label()));
        }
        if self.text(SalaryField::EmployeeName).unwrap_or_default().trim().is_empty() {
            return Err(FormError::Required(SalaryField::EmployeeName.label()));
        }
        let salary = self
            .amount(SalaryField::SalaryAmount)?
            .ok_or(FormError::Required(SalaryField::SalaryAmount.label()))?;

        Ok(SalaryInput {
            salary,
            overtime_days: self.amount_or_zero(SalaryField::OvertimeDays)?,
            overtime_rate: self.amount_or_zero(SalaryField::OvertimeRate)?,
            leave_days: self.amount_or_zero(SalaryField::LeaveTaken)?,
            leave_rate: self.amount_or_zero(SalaryField::LeaveDeduction)?,
            bonus: self.amount_or_zero(SalaryField::Bonus)?,
            deductions: self.amount_or_zero(SalaryField::Deductions)?,
        })
    }

    fn amount(&self, field: SalaryField) -> FormResult<Option<Decimal>> {
        match self.text(field).unwrap_or_default().trim() {
            "" => Ok(None),
            raw => raw
                .parse::<Decimal>()
                .map(Some)
                .map_err(|_| FormError::NotANumber(field.label())),
        }
    }

    fn amount_or_zero(&self, field: SalaryField) -> FormResult<Decimal> {
        Ok(self.amount(field)?.unwrap_or(Decimal::ZERO))
    }

    /// Recompute the breakdown from the current inputs.
    pub fn calculate(&mut self) -> FormResult<()> {
        match self.input().and_then(|input| calculate(&input)) {
            Ok(breakdown) => {
                self.result = Some(breakdown);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Breakdown to display; hidden until the total comes out positive.
    pub fn result(&self) -> Option<&SalaryBreakdown> {
        self.result.as_ref().filter(|r| r.total > Decimal::ZERO)
    }

    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.years));
    }
}

fn step(current: Option<usize>, len: usize, direction: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let index = match current {
        Some(pos) => (pos as isize + direction).rem_euclid(len),
        None if direction >= 0 => 0,
        None => len - 1,
    };
    Some(index as usize)
}
