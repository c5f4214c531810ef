use crate::Result;

use super::{Assignment, Network, Node};

impl Network {
    /// Renders the rounded assignment as a tikz figure: one circle per node,
    /// each carrying edge annotated with its latency formula, the integer
    /// driver count, the travel time those drivers experience together, and
    /// the "potential power" 1 + 2 + ... + drivers.
    pub fn to_latex(
        &self,
        assignment: &Assignment,
        filename: &str,
        width: f32,
        no_text: bool,
    ) -> Result<()> {
        let nodes = self.normalize_node_positions(width);
        let rounded = assignment.rounded();
        let mut latex = Vec::new();

        latex.push(
            "\\begin{figure}[t]
	            \\centering
	            \\begin{tikzpicture}[>=stealth, auto, node distance=2cm, thick]"
                .to_string(),
        );

        for (i, node) in nodes.iter().enumerate() {
            latex.push(format!(
                "\\node[circle, draw] (v{i}) at ({},{}) {{{}}};",
                node.x,
                node.y,
                if no_text { "" } else { &node.name }
            ));
        }

        for edge in &self.edges {
            let drivers = rounded.get(edge.from, edge.to);
            let travel_time = drivers as f64 * edge.latency(drivers as f64);
            let potential_power = drivers * (drivers + 1) / 2;
            latex.push(format!(
                "\\draw[->{}] (v{}) to[bend left=20] node[below, sloped] {{\\footnotesize{{${}$}}}} node[above, sloped] {{\\footnotesize{{${}$}}}} (v{});",
                if drivers > 0 { ", draw=teal" } else { "" },
                edge.from,
                if no_text {
                    " ".to_string()
                } else {
                    edge.latency_formula()
                },
                if no_text {
                    " ".to_string()
                } else {
                    format!("{drivers}\\,|\\,{travel_time}\\,|\\,{potential_power}")
                },
                edge.to,
            ));
        }

        latex.push(
            "\\end{tikzpicture}
	        \\caption{TODO.}
	        \\label{fig:TODO}
        \\end{figure}"
                .to_string(),
        );

        let latex_str = latex.join("\n");

        log::debug!("Writing\n{latex_str}\nto {filename}");
        std::fs::write(filename, latex_str)?;
        Ok(())
    }

    /// Scales stored coordinates into a `width`-wide picture. Files without
    /// coordinates get a circular layout instead of a single stacked point.
    fn normalize_node_positions(&self, width: f32) -> Vec<Node> {
        let all_at_origin = self.nodes.iter().all(|n| n.x == 0.0 && n.y == 0.0);
        if all_at_origin {
            return self
                .nodes
                .iter()
                .enumerate()
                .map(|(i, node)| {
                    let angle =
                        std::f32::consts::TAU * i as f32 / self.nodes.len() as f32;
                    Node {
                        name: node.name.clone(),
                        x: (angle.cos() + 1.0) * width / 2.0,
                        y: (angle.sin() + 1.0) * width / 2.0,
                    }
                })
                .collect();
        }

        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;

        for node in &self.nodes {
            min_x = min_x.min(node.x);
            max_x = max_x.max(node.x);
            min_y = min_y.min(node.y);
            max_y = max_y.max(node.y);
        }

        let height = if max_x > min_x {
            width * (max_y - min_y) / (max_x - min_x)
        } else {
            width
        };

        self.nodes
            .iter()
            .map(|node| Node {
                name: node.name.clone(),
                x: if max_x > min_x {
                    ((node.x - min_x) / (max_x - min_x)) * width
                } else {
                    0.0
                },
                y: if max_y > min_y {
                    ((node.y - min_y) / (max_y - min_y)) * height
                } else {
                    0.0
                },
            })
            .collect()
    }
}
