#[cfg(test)]
mod tests {
    use std::{
        collections::BTreeMap,
        path::PathBuf,
        time::{Duration, Instant},
    };

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        api::{LatestCloses, SheetSource},
        app::{Portfolio, RefreshPolicy},
        error::PipelineError,
        models::{ColumnMap, Warning},
        services::PriceService,
        test::{MockSource, write_temp_csv},
    };

    const SHEET: &str = "Activo,Ticker,Cantidad,Precio_Compra\n\
                         A,A_T,2,$10\n\
                         B,B_T,1,\"$50\"\n";

    fn keyed(prices: &[(&str, Decimal)]) -> LatestCloses {
        LatestCloses::ByTicker(
            prices
                .iter()
                .map(|(t, p)| (t.to_string(), *p))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn portfolio(sheet: SheetSource, source: &MockSource) -> Portfolio {
        Portfolio::new(
            sheet,
            ColumnMap::default(),
            dec!(1500),
            PriceService::new(Box::new(source.clone())),
            RefreshPolicy::new(Duration::from_secs(60)),
        )
    }

    #[tokio::test]
    async fn builds_dashboard_end_to_end() {
        let file = write_temp_csv(SHEET);
        let source = MockSource::answering(keyed(&[("A_T", dec!(20)), ("B_T", dec!(40))]));

        let dashboard = portfolio(SheetSource::Path(file.path().to_path_buf()), &source)
            .build_dashboard()
            .await
            .unwrap();

        let summary = dashboard.summary();
        assert_eq!(*summary.total_value(), dec!(80));
        assert_eq!(*dashboard.holdings()[0].gain(), dec!(20));
        assert_eq!(*dashboard.holdings()[1].gain(), dec!(-10));
        assert_eq!(summary.top_performer().as_ref().unwrap().asset_name(), "A");
        assert_eq!(
            dashboard.allocation(),
            &vec![("A".to_string(), dec!(0.5)), ("B".to_string(), dec!(0.5))]
        );
        assert!(dashboard.warnings().is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn missing_ticker_column_halts_before_price_fetch() {
        let file = write_temp_csv("Activo,Cantidad,Precio_Compra\nA,2,10\n");
        let source = MockSource::answering(keyed(&[]));

        let result = portfolio(SheetSource::Path(file.path().to_path_buf()), &source)
            .build_dashboard()
            .await;

        assert!(matches!(result, Err(PipelineError::MissingColumn(ref c)) if c == "Ticker"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn unreadable_source_halts_before_price_fetch() {
        let source = MockSource::answering(keyed(&[]));

        let result = portfolio(
            SheetSource::Path(PathBuf::from("/definitely/not/here.csv")),
            &source,
        )
        .build_dashboard()
        .await;

        assert!(matches!(result, Err(PipelineError::SourceUnavailable(_))));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn market_outage_values_everything_at_zero() {
        let file = write_temp_csv("Activo,Ticker,Cantidad,Precio_Compra\nBitcoin,BTC-USD,1,10000\n");
        let source = MockSource::failing();

        let dashboard = portfolio(SheetSource::Path(file.path().to_path_buf()), &source)
            .build_dashboard()
            .await
            .unwrap();

        let holding = &dashboard.holdings()[0];
        assert_eq!(*holding.current_value(), Decimal::ZERO);
        assert_eq!(*holding.gain(), dec!(-10000));
        assert!(dashboard.summary().top_performer().is_none());
        assert!(dashboard.allocation().is_empty());
        assert!(
            dashboard
                .warnings()
                .iter()
                .any(|w| matches!(w, Warning::MarketUnavailable { .. }))
        );
        assert!(dashboard.warnings().contains(&Warning::PricesUnresolved {
            tickers: vec!["BTC-USD".to_string()]
        }));
    }

    #[tokio::test]
    async fn undecodable_rows_are_reported_not_fatal() {
        let file = write_temp_csv(
            b"Activo,Ticker,Cantidad,Precio_Compra\nA,A_T,2,10\nCaf\xe9,CAFE,1,1\n",
        );
        let source = MockSource::answering(keyed(&[("A_T", dec!(20))]));

        let dashboard = portfolio(SheetSource::Path(file.path().to_path_buf()), &source)
            .build_dashboard()
            .await
            .unwrap();

        assert_eq!(dashboard.holdings().len(), 1);
        assert_eq!(*dashboard.summary().total_value(), dec!(40));
        assert_eq!(dashboard.warnings(), &vec![Warning::RowsSkipped { count: 1 }]);
    }

    #[tokio::test]
    async fn dirty_cells_degrade_with_a_warning() {
        let file = write_temp_csv(
            "Activo,Ticker,Cantidad,Precio_Compra\n\
             Good,AAA,\"1,000\",$1\n\
             Bad,BBB,abc,\n",
        );
        let source = MockSource::answering(keyed(&[("AAA", dec!(2)), ("BBB", dec!(5))]));

        let dashboard = portfolio(SheetSource::Path(file.path().to_path_buf()), &source)
            .build_dashboard()
            .await
            .unwrap();

        assert_eq!(*dashboard.holdings()[0].current_value(), dec!(2000));
        assert_eq!(*dashboard.holdings()[1].quantity(), Decimal::ZERO);
        assert_eq!(*dashboard.holdings()[1].current_value(), Decimal::ZERO);
        assert_eq!(
            dashboard.warnings(),
            &vec![Warning::CellsDefaulted { count: 2 }]
        );
    }

    #[tokio::test]
    async fn empty_sheet_is_reported_without_price_fetch() {
        let file = write_temp_csv("Activo,Ticker,Cantidad,Precio_Compra\n");
        let source = MockSource::answering(keyed(&[]));

        let dashboard = portfolio(SheetSource::Path(file.path().to_path_buf()), &source)
            .build_dashboard()
            .await
            .unwrap();

        assert!(dashboard.is_empty());
        assert_eq!(dashboard.warnings(), &vec![Warning::EmptySheet]);
        assert_eq!(*dashboard.summary().total_value(), Decimal::ZERO);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn duplicate_tickers_share_one_lookup_but_stay_separate() {
        let file = write_temp_csv(
            "Activo,Ticker,Cantidad,Precio_Compra\n\
             Lot 1,AAPL,1,100\n\
             Lot 2, aapl ,1,300\n",
        );
        let source = MockSource::answering(LatestCloses::Single(dec!(200)));

        let dashboard = portfolio(SheetSource::Path(file.path().to_path_buf()), &source)
            .build_dashboard()
            .await
            .unwrap();

        assert_eq!(source.requests(), vec![vec!["AAPL".to_string()]]);
        assert_eq!(dashboard.holdings().len(), 2);
        assert_eq!(*dashboard.holdings()[0].gain(), dec!(100));
        assert_eq!(*dashboard.holdings()[1].gain(), dec!(-100));
        assert_eq!(
            dashboard.summary().top_performer().as_ref().unwrap().asset_name(),
            "Lot 1"
        );
    }

    #[tokio::test]
    async fn identical_inputs_give_identical_snapshots() {
        let file = write_temp_csv(SHEET);
        let source = MockSource::answering(keyed(&[("A_T", dec!(20.125)), ("B_T", dec!(40))]));
        let portfolio = portfolio(SheetSource::Path(file.path().to_path_buf()), &source);

        let first = portfolio.build_dashboard().await.unwrap();
        let second = portfolio.build_dashboard().await.unwrap();

        assert_eq!(first.holdings(), second.holdings());
        assert_eq!(first.summary(), second.summary());
        assert_eq!(first.allocation(), second.allocation());
        assert_eq!(first.warnings(), second.warnings());
    }

    #[tokio::test]
    async fn refresh_follows_policy() {
        let file = write_temp_csv(SHEET);
        let source = MockSource::answering(keyed(&[("A_T", dec!(20)), ("B_T", dec!(40))]));
        let mut portfolio = portfolio(SheetSource::Path(file.path().to_path_buf()), &source);
        let start = Instant::now();

        assert!(portfolio.latest().is_none());
        assert!(portfolio.refresh_if_due(start, false).await);
        assert!(matches!(portfolio.latest(), Some(Ok(_))));

        assert!(!portfolio.refresh_if_due(start + Duration::from_secs(10), false).await);
        assert!(portfolio.refresh_if_due(start + Duration::from_secs(10), true).await);
        assert!(portfolio.refresh_if_due(start + Duration::from_secs(75), false).await);

        assert_eq!(source.calls(), 3);
        assert_eq!(portfolio.last_refresh(), Some(start + Duration::from_secs(75)));
    }

    #[tokio::test]
    async fn failed_refresh_replaces_previous_snapshot() {
        let file = write_temp_csv(SHEET);
        let path = file.path().to_path_buf();
        let source = MockSource::answering(keyed(&[("A_T", dec!(20)), ("B_T", dec!(40))]));
        let mut portfolio = portfolio(SheetSource::Path(path), &source);

        portfolio.refresh(Instant::now()).await;
        assert!(matches!(portfolio.latest(), Some(Ok(_))));

        drop(file);
        let result = portfolio.refresh(Instant::now()).await;
        assert!(matches!(result, Err(PipelineError::SourceUnavailable(_))));
        assert!(matches!(portfolio.latest(), Some(Err(_))));
    }
}
