use crate::tank::{TankGroup, TankReading, format_value};

pub const REPORT_TITLE: &str = "Daily Chemical Tank Report";

const TABLE_COLUMNS: [&str; 4] = ["TankCode", "WeightValue", "LevelValue", "CapDate"];

/// Renders the mail body: one table per tank group, ISO first. Readings
/// outside both groups only appear in the CSV.
pub fn render_html(readings: &[TankReading]) -> String {
    let mut html = String::new();
    html.push_str("<html>\n  <body>\n");
    html.push_str(&format!(
        "    <h2 style=\"font-family: Arial, sans-serif;\">{REPORT_TITLE}</h2>\n"
    ));

    for group in TankGroup::ALL {
        let rows: Vec<&TankReading> = readings
            .iter()
            .filter(|r| r.group() == Some(group))
            .collect();
        render_table(&mut html, group, &rows);
    }

    html.push_str("  </body>\n</html>\n");
    html
}

fn render_table(html: &mut String, group: TankGroup, rows: &[&TankReading]) {
    html.push_str(&format!(
        "    <h3 style=\"background-color:{}; color:white; padding:5px;\">{}</h3>\n",
        group.color(),
        group.title()
    ));
    html.push_str(
        r#"    <table border="1" cellpadding="5" cellspacing="0" style="border-collapse: collapse; font-family: Arial, sans-serif; width:60%;">"#,
    );
    html.push('\n');

    html.push_str(r#"      <tr style="background-color:#f2f2f2; text-align:center;">"#);
    for column in TABLE_COLUMNS {
        html.push_str(&format!("<th>{column}</th>"));
    }
    html.push_str("</tr>\n");

    for reading in rows {
        let cells = [
            escape_html(&reading.tank_code),
            format_value(reading.weight),
            format_value(reading.level),
            reading.formatted_captured_at(),
        ];

        html.push_str("      <tr>");
        for cell in cells {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("    </table><br>\n");
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn reading(code: &str, weight: Option<f64>) -> TankReading {
        TankReading {
            tank_code: code.to_string(),
            weight,
            level: Some(55.5),
            temperature: Some(21.0),
            captured_at: NaiveDate::from_ymd_opt(2026, 10, 18)
                .unwrap()
                .and_hms_opt(9, 0, 12)
                .unwrap(),
        }
    }

    #[test]
    fn iso_table_precedes_poly_table() {
        let html = render_html(&[reading("Poly1", Some(1.0)), reading("ISO1", Some(2.0))]);

        let iso = html.find("ISOCYANTE CHEMICAL DATA").unwrap();
        let poly = html.find("RAW POLYOL CHEMICAL DATA").unwrap();
        assert!(iso < poly);

        let iso_row = html.find("<td>ISO1</td>").unwrap();
        let poly_row = html.find("<td>Poly1</td>").unwrap();
        assert!(iso < iso_row && iso_row < poly);
        assert!(poly < poly_row);
    }

    #[test]
    fn row_cells_are_rounded_and_formatted() {
        let html = render_html(&[reading("ISO2", Some(1503.456))]);

        assert!(html.contains(
            "<tr><td>ISO2</td><td>1503.46</td><td>55.50</td><td>18-10-2026 09:00</td></tr>"
        ));
    }

    #[test]
    fn temperature_is_not_a_table_column() {
        let html = render_html(&[reading("ISO2", None)]);

        assert!(!html.contains("TempValue"));
        assert!(html.contains("<td>ISO2</td><td></td>"));
    }

    #[test]
    fn ungrouped_tanks_are_left_out() {
        let html = render_html(&[reading("Water1", Some(3.0))]);

        assert!(!html.contains("Water1"));
        assert_eq!(html.matches("<table").count(), 2);
    }

    #[test]
    fn headings_carry_group_colors() {
        let html = render_html(&[]);

        assert!(html.contains(
            "<h2 style=\"font-family: Arial, sans-serif;\">Daily Chemical Tank Report</h2>\n"
        ));
        assert!(html.contains(
            "<h3 style=\"background-color:#e74c3c; color:white; padding:5px;\">ISOCYANTE CHEMICAL DATA</h3>\n"
        ));
        assert!(html.contains(
            "<tr style=\"background-color:#f2f2f2; text-align:center;\"><th>TankCode</th><th>WeightValue</th><th>LevelValue</th><th>CapDate</th></tr>"
        ));
    }

    #[test]
    fn escapes_tank_codes() {
        let html = render_html(&[reading("ISO<1>&", None)]);

        assert!(html.contains("<td>ISO&lt;1&gt;&amp;</td>"));
    }
}
