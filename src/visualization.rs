use crate::error::JuntappError;
use crate::models::Group;
use crate::report;
use crate::settlement;
use log::{debug, error};
use serde_json::{Value, json};

// Generates Chart.js configurations for the reports screen
pub struct Visualization;

impl Visualization {
    /// Generates a Chart.js bar chart configuration for member balances in a
    /// group.
    ///
    /// # Arguments
    /// * `group` - The group for which to visualize balances.
    ///
    /// # Returns
    /// A JSON Value containing the Chart.js configuration, or an error if the
    /// group has no members to chart.
    pub fn balance_chart(group: &Group) -> Result<Value, JuntappError> {
        debug!(
            "Generating balance chart for group {} with {} expenses",
            group.id,
            group.expenses.len()
        );

        if group.members.is_empty() {
            error!("No balances found for group {}", group.id);
            return Err(JuntappError::NoBalancesAvailable(group.id));
        }

        let totals = settlement::compute_totals(group);
        let labels: Vec<String> = group.members.iter().map(|m| m.name.clone()).collect();
        let data: Vec<f64> = group
            .members
            .iter()
            .map(|m| totals.balances.get(&m.id).copied().unwrap_or(0.0))
            .collect();

        debug!("Processed {} members with balances for chart", labels.len());

        let (background_colors, border_colors) = Self::color_cycle(labels.len());

        let chart_config = json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": "Balances Individuales",
                    "data": data,
                    "backgroundColor": background_colors,
                    "borderColor": border_colors,
                    "borderWidth": 1
                }]
            },
            "options": {
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "title": {
                            "display": true,
                            "text": "Balance ($)"
                        }
                    },
                    "x": {
                        "title": {
                            "display": true,
                            "text": "Miembros"
                        }
                    }
                },
                "plugins": {
                    "title": {
                        "display": true,
                        "text": format!("Balances del Grupo: {}", group.name)
                    }
                }
            }
        });

        debug!("Generated Chart.js configuration for group {}", group.id);
        Ok(chart_config)
    }

    /// Pie chart of amount totals per category, in first-seen order.
    pub fn category_chart(group: &Group) -> Value {
        let distribution = report::distribution_by_category(group);
        let labels: Vec<String> = distribution.iter().map(|(c, _)| c.to_string()).collect();
        let data: Vec<f64> = distribution.iter().map(|(_, total)| *total).collect();
        let (background_colors, _) = Self::color_cycle(labels.len());

        json!({
            "type": "pie",
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": "Gastos por Categoría",
                    "data": data,
                    "backgroundColor": background_colors,
                }]
            },
            "options": {
                "plugins": {
                    "title": {
                        "display": true,
                        "text": format!("Distribución de Gastos: {}", group.name)
                    }
                }
            }
        })
    }

    // Cycles a fixed palette to support any number of series
    fn color_cycle(len: usize) -> (Vec<String>, Vec<String>) {
        let base_colors = [
            (75, 192, 192),  // Teal
            (255, 99, 132),  // Red
            (54, 162, 235),  // Blue
            (255, 206, 86),  // Yellow
            (153, 102, 255), // Purple
        ];
        let mut background_colors = Vec::new();
        let mut border_colors = Vec::new();
        for i in 0..len {
            let (r, g, b) = base_colors[i % base_colors.len()];
            background_colors.push(format!("rgba({}, {}, {}, 0.6)", r, g, b));
            border_colors.push(format!("rgba({}, {}, {}, 1)", r, g, b));
        }
        (background_colors, border_colors)
    }
}
