//! Renders a filtered transaction set as a downloadable CSV attachment.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{Error, transaction::Transaction};

/// The file name offered to the browser for CSV downloads.
const DOWNLOAD_FILE_NAME: &str = "transactions.csv";

/// Render transactions as CSV text, one header row then one row per
/// transaction.
///
/// # Errors
/// Returns an [Error::CsvError] if serialization fails.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for transaction in transactions {
        writer
            .serialize(transaction)
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

/// Wrap CSV text in a response with standard attachment headers.
pub fn csv_download_response(csv: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

#[cfg(test)]
mod csv_export_tests {
    use axum::http::header;

    use crate::transaction::Transaction;

    use super::{csv_download_response, transactions_to_csv};

    fn sample_transaction() -> Transaction {
        Transaction {
            id: "abc-123".to_owned(),
            account_id: Some(2),
            date: "2024-01-05T00:00:00Z".to_owned(),
            name: Some("Tim Hortons".to_owned()),
            description: "tim hortons".to_owned(),
            amount: -12.5,
            category: "take_out".to_owned(),
            is_reoccuring: false,
        }
    }

    #[test]
    fn renders_header_and_data_rows() {
        let csv = transactions_to_csv(&[sample_transaction()]).expect("Could not render CSV");

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,account_id,date,name,description,amount,category,is_reoccuring")
        );
        assert_eq!(
            lines.next(),
            Some("abc-123,2,2024-01-05T00:00:00Z,Tim Hortons,tim hortons,-12.5,take_out,false")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_set_renders_no_rows() {
        let csv = transactions_to_csv(&[]).expect("Could not render CSV");

        assert!(csv.is_empty());
    }

    #[test]
    fn download_response_has_attachment_headers() {
        let response = csv_download_response("id\n".to_owned());

        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .unwrap(),
            "attachment; filename=\"transactions.csv\""
        );
    }
}
