//! Load loan descriptors from CSV
//!
//! Expected columns: `balance,interestRate,minimumPayment,dueDate`.
//! Descriptors are validated on load so malformed input never reaches the
//! simulation loop.

use super::LoanDescriptor;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load and validate loan descriptors from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanDescriptor>, Box<dyn Error>> {
    let file = File::open(path)?;
    load_loans_from_reader(file)
}

/// Load and validate loan descriptors from any reader
pub fn load_loans_from_reader<R: Read>(reader: R) -> Result<Vec<LoanDescriptor>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut loans = Vec::new();

    for (index, record) in rdr.deserialize().enumerate() {
        let loan: LoanDescriptor = record?;
        loan.validate(index)?;
        loans.push(loan);
    }

    Ok(loans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_from_reader() {
        let csv = "\
balance,interestRate,minimumPayment,dueDate
1000,0.01,100,1
500,0.02,50,15
";
        let loans = load_loans_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].balance, dec!(1000));
        assert_eq!(loans[1].interest_rate, dec!(0.02));
        assert_eq!(loans[1].due_date, 15);
    }

    #[test]
    fn test_invalid_row_rejected() {
        let csv = "\
balance,interestRate,minimumPayment,dueDate
1000,0.01,100,31
";
        assert!(load_loans_from_reader(csv.as_bytes()).is_err());
    }
}
