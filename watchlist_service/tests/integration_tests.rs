// tests/integration_tests.rs

use watchlist_service::loader::read_watchlist;
use watchlist_service::models::WatchlistError;

const FULL_HEADER: &str = "Name,NSE Code,Industry,Current Price,Market Capitalization,\
Price to Earning,Return on equity,Return on invested capital,Debt to equity,\
Sales growth 5Years,Profit growth 5Years,Free cash flow last year,Dividend yield,\
NPM last year,Operating profit,Sales,Return over 1year,Return over 3years,Return over 5years";

#[test]
fn test_read_full_watchlist() {
    let csv = format!(
        "{FULL_HEADER}\n\
         Acme Industries,ACME,Chemicals,512.40,12000,14.2,21.5,18.0,0.25,17.0,16.0,320,1.2,11.0,240,1200,24.0,18.0,15.0\n\
         Basalt Power,BSLT,Power,88.10,4500,22.0,9.0,7.5,1.4,4.0,2.0,-50,0.0,3.0,90,1500,-5.0,2.0,6.0"
    );

    let records = read_watchlist(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 2);

    let acme = &records[0];
    assert_eq!(acme.name, "Acme Industries");
    assert_eq!(acme.nse_code, "ACME");
    assert_eq!(acme.industry.as_deref(), Some("Chemicals"));
    assert_eq!(acme.current_price, Some(512.40));
    assert_eq!(acme.market_cap, Some(12000.0));
    assert_eq!(acme.roe, Some(21.5));
    assert_eq!(acme.free_cash_flow, Some(320.0));
    assert_eq!(acme.return_5y, Some(15.0));

    let basalt = &records[1];
    assert_eq!(basalt.free_cash_flow, Some(-50.0));
    assert_eq!(basalt.return_1y, Some(-5.0));
}

#[test]
fn test_blank_and_placeholder_cells_load_as_none() {
    let csv = format!(
        "{FULL_HEADER}\n\
         Acme Industries,ACME,,512.40,,NA,21.5,,N/A,,,,,,,,,,"
    );

    let records = read_watchlist(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 1);

    let acme = &records[0];
    assert_eq!(acme.industry, None);
    assert_eq!(acme.market_cap, None);
    assert_eq!(acme.pe, None);
    assert_eq!(acme.roe, Some(21.5));
    assert_eq!(acme.debt_to_equity, None);
    assert_eq!(acme.sales_growth_5y, None);
    assert_eq!(acme.return_1y, None);
}

#[test]
fn test_optional_columns_may_be_missing_entirely() {
    let csv = "Name,NSE Code,Current Price,Return on equity,Price to Earning\n\
               Acme Industries,ACME,512.40,21.5,14.2";

    let records = read_watchlist(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].roe, Some(21.5));
    assert_eq!(records[0].industry, None);
    assert_eq!(records[0].market_cap, None);
}

#[test]
fn test_column_order_is_irrelevant() {
    let csv = "Price to Earning,Return on equity,NSE Code,Current Price,Name\n\
               14.2,21.5,ACME,512.40,Acme Industries";

    let records = read_watchlist(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Acme Industries");
    assert_eq!(records[0].pe, Some(14.2));
}

#[test]
fn test_missing_required_columns_lists_all_names() {
    let csv = "Name,Industry\nAcme Industries,Chemicals";

    let err = read_watchlist(csv.as_bytes()).unwrap_err();
    match err {
        WatchlistError::MissingColumns(missing) => {
            assert_eq!(
                missing,
                vec![
                    "NSE Code".to_string(),
                    "Current Price".to_string(),
                    "Return on equity".to_string(),
                    "Price to Earning".to_string(),
                ]
            );
        }
        other => panic!("Expected MissingColumns error, got {other:?}"),
    }

    let message = read_watchlist(csv.as_bytes()).unwrap_err().to_string();
    assert!(message.contains("NSE Code"));
    assert!(message.contains("Price to Earning"));
}

#[test]
fn test_rows_without_identity_are_skipped() {
    let csv = "Name,NSE Code,Current Price,Return on equity,Price to Earning\n\
               Acme Industries,ACME,512.40,21.5,14.2\n\
               ,BSLT,88.10,9.0,22.0\n\
               Carbide Tools,,44.00,12.0,18.0\n\
               Dune Textiles,DUNE,12.75,8.0,9.5";

    let records = read_watchlist(csv.as_bytes()).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Acme Industries", "Dune Textiles"]);
}

#[test]
fn test_empty_file_has_no_records() {
    let csv = "Name,NSE Code,Current Price,Return on equity,Price to Earning\n";
    let records = read_watchlist(csv.as_bytes()).unwrap();
    assert!(records.is_empty());
}
