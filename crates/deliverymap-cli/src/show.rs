//! `show` command: one restaurant's delivery network and daily order trend.

use std::io::{self, Write};

use deliverymap_core::{RelationOutcome, RelationReport, Selection, NO_DATA_WARNING};
use deliverymap_data::Dataset;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(crate) enum ShowOutput<'a> {
    Empty {
        warning: &'a str,
    },
    Ready {
        #[serde(flatten)]
        report: &'a RelationReport,
    },
}

impl<'a> From<&'a RelationOutcome> for ShowOutput<'a> {
    fn from(outcome: &'a RelationOutcome) -> Self {
        match outcome {
            RelationOutcome::NoMatches => ShowOutput::Empty {
                warning: NO_DATA_WARNING,
            },
            RelationOutcome::Ready(report) => ShowOutput::Ready { report },
        }
    }
}

/// Run the relation pipeline for one selection and print it.
///
/// An empty selection prints the no-data warning; it is not an error.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub(crate) fn run_show(
    dataset: &Dataset,
    zone: String,
    restaurant: String,
    json: bool,
) -> anyhow::Result<()> {
    let selection = Selection::new(zone, restaurant);
    let outcome = dataset.relation(&selection);

    if json {
        let output = ShowOutput::from(&outcome);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome {
        RelationOutcome::NoMatches => eprintln!("warning: {NO_DATA_WARNING}"),
        RelationOutcome::Ready(report) => write_report(&mut io::stdout().lock(), &report)?,
    }
    Ok(())
}

/// Write a report as plain-text tables.
pub(crate) fn write_report<W: Write>(out: &mut W, report: &RelationReport) -> io::Result<()> {
    writeln!(
        out,
        "Restaurant and Delivery Network: {} ({})",
        report.selection.restaurant, report.selection.zone
    )?;

    match &report.network {
        Some(network) => {
            for node in &network.restaurants {
                writeln!(
                    out,
                    "  {} at {:.4}, {:.4}",
                    node.hover_text(),
                    node.position.lat,
                    node.position.lon
                )?;
            }
            writeln!(
                out,
                "  map center {:.4}, {:.4} (zoom {})",
                network.center.lat, network.center.lon, network.zoom
            )?;
            writeln!(out)?;
            writeln!(
                out,
                "{:<14}{:<22}{:>12}{:>12}{:>10}",
                "ORDER", "DATE", "LAT", "LON", "KM"
            )?;
            for delivery in &network.deliveries {
                writeln!(
                    out,
                    "{:<14}{:<22}{:>12.4}{:>12.4}{:>10.2}",
                    delivery.order_id,
                    delivery.order_date.as_deref().unwrap_or("-"),
                    delivery.position.lat,
                    delivery.position.lon,
                    delivery.distance_km
                )?;
            }
        }
        None => writeln!(out, "  no orders with valid coordinates to map")?,
    }
    if report.skipped_invalid_coordinates > 0 {
        writeln!(
            out,
            "  ({} orders skipped for invalid coordinates)",
            report.skipped_invalid_coordinates
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Restaurant Summary")?;
    writeln!(
        out,
        "Average Daily Order Delivery: {}",
        report.trend.average_display()
    )?;
    if report.trend.unparsed_dates > 0 {
        writeln!(
            out,
            "  ({} orders without a usable date)",
            report.trend.unparsed_dates
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Daily Order Trends")?;
    writeln!(out, "{:<12}{:>8}", "DATE", "ORDERS")?;
    for day in &report.trend.daily {
        writeln!(out, "{:<12}{:>8}", day.date.format("%Y-%m-%d"), day.orders)?;
    }

    Ok(())
}
