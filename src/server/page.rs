//! The single dashboard page.
//!
//! Charts are drawn client-side by Plotly.js from the figure JSON returned by
//! `/update`; the server only fills in the title, assets and dropdown options.

use crate::util::escape_html;

pub(super) const WHOLE_COUNTRY_LABEL: &str = "Whole country";

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" />
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
{{STYLESHEET}}</head>
<body>
  <div class="container-fluid">
    <div class="row topbar py-2 px-3 mb-2">
{{LOGO}}      <div class="col d-flex align-items-center">
        <h3 class="mb-0 text-brand">{{TITLE}}</h3>
      </div>
    </div>

    <div class="row px-3 pb-2">
      <div class="col-md-4">
        <label class="label" for="ddl-leader">Select a cluster (leader ATA):</label>
        <select id="ddl-leader" class="form-select">
{{OPTIONS}}        </select>
      </div>
      <div class="col-md-8 d-flex align-items-end">
        <dl id="cluster-summary" class="row mb-0 small w-100"></dl>
      </div>
    </div>

    <div class="row px-3">
      <div class="col-md-12">
        <div id="map-geo" style="height: 65vh"></div>
      </div>
    </div>

    <div class="row px-3 pb-4">
      <div class="col-md-12">
        <div id="fig-bars-pie" style="height: 450px"></div>
      </div>
    </div>
  </div>

  <script>
    const select = document.getElementById("ddl-leader");
    const summary = document.getElementById("cluster-summary");
    const config = { displayModeBar: true, responsive: true };

    function renderSummary(stats) {
      summary.replaceChildren();
      for (const stat of stats) {
        const term = document.createElement("dt");
        term.className = "col-sm-3 text-muted";
        term.textContent = stat.label;
        const value = document.createElement("dd");
        value.className = "col-sm-3";
        value.textContent = stat.value;
        summary.append(term, value);
      }
    }

    let inFlight = null;

    async function refresh() {
      if (inFlight) {
        inFlight.abort();
      }
      const controller = new AbortController();
      inFlight = controller;

      try {
        const response = await fetch(
          "/update?leader=" + encodeURIComponent(select.value),
          { signal: controller.signal },
        );
        if (!response.ok) {
          return;
        }
        const view = await response.json();
        if (controller !== inFlight) {
          return;
        }
        Plotly.react("map-geo", view.map.data, view.map.layout, config);
        Plotly.react("fig-bars-pie", view.distribution.data, view.distribution.layout, config);
        renderSummary(view.summary);
      } catch (err) {
        if (err.name !== "AbortError") {
          console.error("dashboard update failed", err);
        }
      } finally {
        if (controller === inFlight) {
          inFlight = null;
        }
      }
    }

    select.addEventListener("change", refresh);
    refresh();
  </script>
</body>
</html>
"#;

pub(super) struct PageOptions<'a> {
    pub(super) title: &'a str,
    /// File name under `/assets/`, present only when the file exists.
    pub(super) logo: Option<&'a str>,
    pub(super) stylesheet: Option<&'a str>,
}

pub(super) fn render_page(leaders: &[String], options: &PageOptions<'_>) -> String {
    let mut option_tags = format!(
        "          <option value=\"\" selected>{}</option>\n",
        escape_html(WHOLE_COUNTRY_LABEL)
    );
    for leader in leaders {
        let leader = escape_html(leader);
        option_tags.push_str(&format!(
            "          <option value=\"{leader}\">{leader}</option>\n"
        ));
    }

    let logo = options
        .logo
        .map(|file| {
            format!(
                "      <div class=\"col-auto d-flex align-items-center\">\n        \
                 <img src=\"/assets/{}\" height=\"46\" alt=\"\" />\n      </div>\n",
                escape_html(file)
            )
        })
        .unwrap_or_default();

    let stylesheet = options
        .stylesheet
        .map(|file| {
            format!(
                "  <link rel=\"stylesheet\" href=\"/assets/{}\" />\n",
                escape_html(file)
            )
        })
        .unwrap_or_default();

    PAGE_TEMPLATE
        .replace("{{TITLE}}", &escape_html(options.title))
        .replace("{{STYLESHEET}}", &stylesheet)
        .replace("{{LOGO}}", &logo)
        .replace("{{OPTIONS}}", &option_tags)
}
