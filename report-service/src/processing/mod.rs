//! CSV parsing and row transformation for sales reports.
//!
//! Parsing is strict: every data row must carry the full set of required
//! columns (`order_id`, `product_id`, `quantity`, `price`, `order_date`)
//! with numeric `quantity` and `price`. Any violation aborts the whole
//! parse with `ApiError::MalformedInput` and no rows are produced.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{ApiResult, ProcessedSale, SalesRecord};

/// Parse raw report bytes into processed sales rows.
///
/// `process_date` is the date of the ingestion run and is stamped onto
/// every row. `total_amount` is `quantity * price` rounded to 2 fractional
/// digits.
pub fn parse_report(data: &[u8], process_date: NaiveDate) -> ApiResult<Vec<ProcessedSale>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut sales = Vec::new();

    for record in reader.deserialize::<SalesRecord>() {
        sales.push(transform(record?, process_date));
    }

    Ok(sales)
}

fn transform(record: SalesRecord, process_date: NaiveDate) -> ProcessedSale {
    // Monetary amounts always carry exactly 2 fractional digits, whatever
    // scale the input price came in with.
    let mut total_amount = (record.price * Decimal::from(record.quantity)).round_dp(2);
    total_amount.rescale(2);

    ProcessedSale {
        order_id: record.order_id,
        product_id: record.product_id,
        quantity: record.quantity,
        price: record.price,
        total_amount,
        order_date: record.order_date,
        process_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiError;
    use pretty_assertions::assert_eq;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_parses_all_rows() {
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,2,10.00,2024-01-01\n\
                    A2,P2,1,5.50,2024-01-02\n\
                    A3,P1,3,10.00,2024-01-03\n";

        let sales = parse_report(csv, run_date()).unwrap();
        assert_eq!(sales.len(), 3);
    }

    #[test]
    fn test_total_amount_is_quantity_times_price() {
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,2,10.00,2024-01-01\n";

        let sales = parse_report(csv, run_date()).unwrap();
        assert_eq!(sales[0].total_amount, Decimal::new(2000, 2));
        assert_eq!(sales[0].total_amount.to_string(), "20.00");
    }

    #[test]
    fn test_price_keeps_fixed_point_scale() {
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,2,10.00,2024-01-01\n";

        let sales = parse_report(csv, run_date()).unwrap();
        assert_eq!(sales[0].price.to_string(), "10.00");
        assert_eq!(sales[0].price.scale(), 2);
    }

    #[test]
    fn test_whole_number_price_pads_to_two_digits() {
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,2,5,2024-01-01\n";

        let sales = parse_report(csv, run_date()).unwrap();
        assert_eq!(sales[0].total_amount.to_string(), "10.00");
    }

    #[test]
    fn test_total_amount_rounds_to_two_digits() {
        // 3 * 3.333 = 9.999 -> 10.00 at 2 fractional digits
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,3,3.333,2024-01-01\n";

        let sales = parse_report(csv, run_date()).unwrap();
        assert_eq!(sales[0].total_amount.to_string(), "10.00");
    }

    #[test]
    fn test_stamps_process_date() {
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,2,10.00,2024-01-01\n";

        let sales = parse_report(csv, run_date()).unwrap();
        assert_eq!(sales[0].process_date, run_date());
        assert_eq!(sales[0].order_date, "2024-01-01");
    }

    #[test]
    fn test_missing_required_column_is_malformed() {
        // No price column at all.
        let csv = b"order_id,product_id,quantity,order_date\n\
                    A1,P1,2,2024-01-01\n";

        let err = parse_report(csv, run_date()).unwrap_err();
        assert!(matches!(err, ApiError::MalformedInput(_)));
    }

    #[test]
    fn test_non_numeric_quantity_is_malformed() {
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,two,10.00,2024-01-01\n";

        let err = parse_report(csv, run_date()).unwrap_err();
        assert!(matches!(err, ApiError::MalformedInput(_)));
    }

    #[test]
    fn test_non_numeric_price_is_malformed() {
        let csv = b"order_id,product_id,quantity,price,order_date\n\
                    A1,P1,2,ten,2024-01-01\n";

        let err = parse_report(csv, run_date()).unwrap_err();
        assert!(matches!(err, ApiError::MalformedInput(_)));
    }

    #[test]
    fn test_header_only_report_yields_zero_rows() {
        let csv = b"order_id,product_id,quantity,price,order_date\n";

        let sales = parse_report(csv, run_date()).unwrap();
        assert!(sales.is_empty());
    }
}
