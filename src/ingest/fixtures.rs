/// Test fixtures: representative HTML from the City of Cape Town water
/// dashboard (http://coct.co/water-dashboard/).
///
/// Page shape the extractor relies on:
///   first <h3>                  — day zero, "DD . MM . YYYY" with loose spacing
///   .percentage_label[0]        — city augmentation progress (not extracted)
///   .percentage_label[1]        — dam level, e.g. "60.1%"
///   .percentage_label[2]        — residents meeting the target, e.g. "55.3%"
///
/// The full page lives in `tests/fixtures/dashboard.html` so the integration
/// tests can serve the same bytes. The smaller fixtures below each break one
/// assumption.

/// Full dashboard page: day zero 12.04.2018, dams 60.1%, residents 55.3%.
#[cfg(test)]
pub(crate) fn fixture_dashboard_html() -> &'static str {
    include_str!("../../tests/fixtures/dashboard.html")
}

/// No <h3> at all; percentage labels intact.
#[cfg(test)]
pub(crate) fn fixture_missing_heading_html() -> &'static str {
    r#"<html><body>
      <h2>Day Zero</h2>
      <span class="percentage_label">38%</span>
      <span class="percentage_label">60.1%</span>
      <span class="percentage_label">55.3%</span>
    </body></html>"#
}

/// First <h3> holds a date without the year; fewer than 10 characters
/// remain once whitespace is removed.
#[cfg(test)]
pub(crate) fn fixture_short_heading_html() -> &'static str {
    r#"<html><body>
      <h3> 12 . 04 </h3>
      <span class="percentage_label">38%</span>
      <span class="percentage_label">60.1%</span>
      <span class="percentage_label">55.3%</span>
    </body></html>"#
}

/// Day zero written out in words, as the page briefly did.
#[cfg(test)]
pub(crate) fn fixture_worded_date_html() -> &'static str {
    r#"<html><body>
      <h3>12 April 2018</h3>
      <span class="percentage_label">38%</span>
      <span class="percentage_label">60.1%</span>
      <span class="percentage_label">55.3%</span>
    </body></html>"#
}

/// Well-shaped but impossible calendar date.
#[cfg(test)]
pub(crate) fn fixture_impossible_date_html() -> &'static str {
    r#"<html><body><h3>31.02.2018</h3></body></html>"#
}

/// Only two percentage labels: dam level present, residents missing.
#[cfg(test)]
pub(crate) fn fixture_two_labels_html() -> &'static str {
    r#"<html><body>
      <h3>12.04.2018</h3>
      <span class="percentage_label">38%</span>
      <span class="percentage_label">60.1%</span>
    </body></html>"#
}

/// A single percentage label: both dam level and residents missing.
#[cfg(test)]
pub(crate) fn fixture_one_label_html() -> &'static str {
    r#"<html><body>
      <h3>12.04.2018</h3>
      <span class="percentage_label">38%</span>
    </body></html>"#
}

/// Labels present but their text is not numeric.
#[cfg(test)]
pub(crate) fn fixture_non_numeric_labels_html() -> &'static str {
    r#"<html><body>
      <h3>12.04.2018</h3>
      <span class="percentage_label">38%</span>
      <span class="percentage_label">n/a</span>
      <span class="percentage_label">pending%</span>
    </body></html>"#
}

/// Single-digit dam level: "9%" is shorter than the four characters read.
#[cfg(test)]
pub(crate) fn fixture_short_dam_level_html() -> &'static str {
    r#"<html><body>
      <h3>12.04.2018</h3>
      <span class="percentage_label">38%</span>
      <span class="percentage_label">9%</span>
      <span class="percentage_label">%55.3%</span>
    </body></html>"#
}

/// Labels with nested markup; text content spans child elements.
#[cfg(test)]
pub(crate) fn fixture_nested_label_markup_html() -> &'static str {
    r#"<html><body>
      <h3><span>12</span>.<span>04</span>.<span>2018</span></h3>
      <div class="percentage_label">38<sup>%</sup></div>
      <div class="percentage_label"><b>24.9</b><sup>%</sup></div>
      <div class="percentage_label"><b>61</b><sup>%</sup></div>
    </body></html>"#
}
