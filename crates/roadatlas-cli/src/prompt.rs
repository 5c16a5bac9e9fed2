//! Interactive prompt loop for route queries.

use std::io::{BufRead, Write};

use anyhow::Result;
use roadatlas_lib::Atlas;

/// Run the interactive query loop until `EXIT` or end of input.
///
/// Each round asks for two country names, validating every answer against
/// the atlas before moving on, then prints the shortest route between them.
pub fn run_prompt_loop(
    atlas: &Atlas,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    loop {
        let Some(first) = prompt_country(atlas, input, output, "first")? else {
            break;
        };
        let Some(second) = prompt_country(atlas, input, output, "second")? else {
            break;
        };
        render_route(atlas, &first, &second, output)?;
    }
    Ok(())
}

/// Ask for one country name until a resolvable one is entered. Returns
/// `None` when the user types `EXIT` or input ends.
fn prompt_country(
    atlas: &Atlas,
    input: &mut impl BufRead,
    output: &mut impl Write,
    which: &str,
) -> Result<Option<String>> {
    loop {
        write!(
            output,
            "Enter the name of the {which} country (type EXIT to quit): "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let name = line.trim();
        if name.eq_ignore_ascii_case("EXIT") {
            return Ok(None);
        }

        match atlas.resolve(name) {
            Ok(country) => return Ok(Some(country.name.clone())),
            Err(err) => writeln!(output, "Invalid country name: {err}")?,
        }
    }
}

fn render_route(atlas: &Atlas, from: &str, to: &str, output: &mut impl Write) -> Result<()> {
    let route = atlas.shortest_path(from, to);
    if route.is_empty() || !route.reaches(to) {
        writeln!(output, "No land route exists between {from} and {to}.")?;
        return Ok(());
    }

    writeln!(output, "Route from {from} to {to}:")?;
    for (pair, km) in route.steps.windows(2).zip(route.distances.iter()) {
        writeln!(output, "* {} --> {} ({} km.)", pair[0], pair[1], km)?;
    }
    writeln!(output, "Total distance: {} km.", route.total_km())?;
    Ok(())
}
