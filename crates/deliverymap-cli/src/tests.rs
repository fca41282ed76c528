use deliverymap_core::{
    build_relation, join_records, OrderRecord, RelationOutcome, RestaurantRecord, Selection,
};

use super::*;

#[test]
fn parses_zones_command() {
    let cli = Cli::try_parse_from(["deliverymap-cli", "zones"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Zones)));
    assert!(cli.orders.is_none());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["deliverymap-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn restaurants_requires_zone() {
    let result = Cli::try_parse_from(["deliverymap-cli", "restaurants"]);
    assert!(result.is_err(), "zone should be required");
}

#[test]
fn parses_show_with_json_flag() {
    let cli = Cli::try_parse_from([
        "deliverymap-cli",
        "show",
        "--zone",
        "Clifton",
        "--restaurant",
        "Burger Hub",
        "--json",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Show {
            zone,
            restaurant,
            json,
        }) => {
            assert_eq!(zone, "Clifton");
            assert_eq!(restaurant, "Burger Hub");
            assert!(json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn show_requires_both_selectors() {
    let result = Cli::try_parse_from(["deliverymap-cli", "show", "--zone", "Clifton"]);
    assert!(result.is_err(), "restaurant should be required");
}

#[test]
fn global_path_overrides_follow_subcommand() {
    let cli = Cli::try_parse_from([
        "deliverymap-cli",
        "stats",
        "--orders",
        "/tmp/orders.csv",
        "--restaurants",
        "/tmp/restaurants.csv",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(Commands::Stats)));
    assert_eq!(cli.orders, Some(PathBuf::from("/tmp/orders.csv")));
    assert_eq!(cli.restaurants, Some(PathBuf::from("/tmp/restaurants.csv")));
}

fn burger_hub_outcome() -> RelationOutcome {
    let restaurants = vec![RestaurantRecord {
        id: "10".to_string(),
        name: "Burger Hub".to_string(),
        zone_name: "Clifton".to_string(),
        latitude: Some(0.0),
        longitude: Some(0.0),
    }];
    let orders = vec![
        OrderRecord {
            order_id: "1001".to_string(),
            branch_id: "10".to_string(),
            order_date: Some("2024-01-01 09:00:00".to_string()),
            delivery_latitude: Some(0.0),
            delivery_longitude: Some(1.0),
        },
        OrderRecord {
            order_id: "1002".to_string(),
            branch_id: "10".to_string(),
            order_date: None,
            delivery_latitude: Some(1.0),
            delivery_longitude: Some(0.0),
        },
    ];
    let joined = join_records(&orders, &restaurants);
    build_relation(&joined, &Selection::new("Clifton", "Burger Hub"))
}

#[test]
fn write_report_lists_deliveries_and_trend() {
    let RelationOutcome::Ready(report) = burger_hub_outcome() else {
        panic!("expected ready report");
    };

    let mut buf = Vec::new();
    show::write_report(&mut buf, &report).expect("write report");
    let text = String::from_utf8(buf).expect("utf8 report");

    assert!(text.contains("Restaurant: Burger Hub"));
    assert!(text.contains("1001"));
    assert!(text.contains("111.19"));
    assert!(text.contains("Average Daily Order Delivery: 1.00"));
    assert!(text.contains("(1 orders without a usable date)"));
    assert!(text.contains("2024-01-01"));
    assert!(!text.contains('\u{2014}'));
}

#[test]
fn json_output_flattens_ready_report() {
    let outcome = burger_hub_outcome();
    let json = serde_json::to_value(show::ShowOutput::from(&outcome)).expect("serialize");

    assert_eq!(json["status"], "ready");
    assert_eq!(json["selection"]["restaurant"], "Burger Hub");
    assert_eq!(json["order_count"], 2);
    assert_eq!(json["network"]["zoom"], 12);
    assert_eq!(json["network"]["deliveries"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["trend"]["daily"],
        serde_json::json!([{ "date": "2024-01-01", "orders": 1 }])
    );
    assert_eq!(json["trend"]["unparsed_dates"], 1);
    assert!(json.get("warning").is_none());
}

#[test]
fn json_output_for_empty_selection_carries_warning() {
    let outcome = RelationOutcome::NoMatches;
    let json = serde_json::to_value(show::ShowOutput::from(&outcome)).expect("serialize");

    assert_eq!(
        json,
        serde_json::json!({
            "status": "empty",
            "warning": "No data available for the selected filters."
        })
    );
}
