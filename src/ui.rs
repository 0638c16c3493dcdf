use crate::report::{DEFAULT_ROLLING_WINDOW, ROLLING_WINDOW_CHOICES};

pub fn render_dashboard() -> String {
    let buttons = ROLLING_WINDOW_CHOICES
        .iter()
        .map(|days| {
            let active = if *days == DEFAULT_ROLLING_WINDOW {
                " active"
            } else {
                ""
            };
            format!(
                r#"<button class="tab{active}" type="button" data-window="{days}" role="tab" aria-selected="{selected}">{days} days</button>"#,
                selected = !active.is_empty(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ");

    DASHBOARD_HTML
        .replace("{{WINDOW_BUTTONS}}", &buttons)
        .replace("{{DEFAULT_WINDOW}}", &DEFAULT_ROLLING_WINDOW.to_string())
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Dashboard</title>
  <style>
    :root {
      --bg: #f4f6f3;
      --ink: #23302a;
      --muted: #6d7a72;
      --in: #2e8b6f;
      --out: #c06840;
      --net: #2f4858;
      --roll: #8a4fad;
      --card: #ffffff;
      --edge: rgba(35, 48, 42, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #e8efe9);
      color: var(--ink);
      font-family: "Avenir Next", "Segoe UI", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      display: grid;
      gap: 22px;
    }

    header h1 {
      margin: 0;
      font-size: clamp(1.7rem, 3.5vw, 2.3rem);
    }

    header .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
    }

    .stat {
      background: var(--card);
      border: 1px solid var(--edge);
      border-radius: 14px;
      padding: 14px 16px;
    }

    .stat .label {
      display: block;
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      display: block;
      margin-top: 6px;
      font-size: 1.5rem;
      font-weight: 600;
    }

    .panel {
      background: var(--card);
      border: 1px solid var(--edge);
      border-radius: 16px;
      padding: 18px;
      display: grid;
      gap: 10px;
    }

    .panel-head {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 10px;
    }

    .panel-head h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .legend {
      display: flex;
      gap: 14px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .legend .key::before {
      content: "";
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 3px;
      margin-right: 6px;
      background: currentColor;
    }

    .key.in { color: var(--in); }
    .key.out { color: var(--out); }
    .key.net { color: var(--net); }
    .key.roll { color: var(--roll); }

    svg.chart {
      width: 100%;
      height: 250px;
      display: block;
    }

    .chart-grid { stroke: rgba(35, 48, 42, 0.1); }
    .chart-zero { stroke: rgba(35, 48, 42, 0.3); stroke-dasharray: 4 6; }
    .chart-label { fill: var(--muted); font-size: 11px; }
    .chart-label.right { fill: var(--roll); }
    .line { fill: none; stroke-width: 2.5; }
    .line-in { stroke: var(--in); }
    .line-out { stroke: var(--out); }
    .line-net { stroke: var(--net); }
    .line-roll { stroke: var(--roll); }

    .controls {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 14px;
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(35, 48, 42, 0.07);
      border-radius: 999px;
    }

    .tab {
      appearance: none;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 7px 13px;
      font-size: 0.88rem;
      font-weight: 600;
      color: var(--muted);
      cursor: pointer;
    }

    .tab.active {
      background: var(--card);
      color: var(--net);
      box-shadow: 0 6px 14px rgba(35, 48, 42, 0.14);
    }

    .slider {
      display: grid;
      gap: 4px;
      flex: 1;
      min-width: 220px;
    }

    .slider label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .slider input {
      width: 100%;
      accent-color: var(--net);
    }

    .btn-refresh {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      color: white;
      background: var(--net);
      cursor: pointer;
    }

    .status {
      font-size: 0.9rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] { color: #b23b2b; }
    .status[data-type="ok"] { color: #2d7a4b; }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Calorie Dashboard</h1>
      <p class="subtitle">Daily intake against expenditure, with a rolling net-calorie trend.</p>
    </header>

    <section class="metrics">
      <div class="stat">
        <span class="label">Days shown</span>
        <span class="value" id="metric-days">0</span>
      </div>
      <div class="stat">
        <span class="label">Avg calories in</span>
        <span class="value" id="metric-in">--</span>
      </div>
      <div class="stat">
        <span class="label">Avg net</span>
        <span class="value" id="metric-net">--</span>
      </div>
      <div class="stat">
        <span class="label">Rolling window</span>
        <span class="value" id="metric-window">{{DEFAULT_WINDOW}} days</span>
      </div>
    </section>

    <section class="panel">
      <div class="panel-head">
        <h2>Daily calorie intake and consumption</h2>
        <div class="legend">
          <span class="key in">Calories in</span>
          <span class="key out">Calories out</span>
        </div>
      </div>
      <svg id="chart-daily" class="chart" viewBox="0 0 640 250" role="img" aria-label="Daily intake and expenditure"></svg>
    </section>

    <section class="panel">
      <div class="panel-head">
        <h2>Net calories and rolling sum</h2>
        <div class="legend">
          <span class="key net">Net calories</span>
          <span class="key roll" id="rolling-key">{{DEFAULT_WINDOW}}-day rolling sum</span>
        </div>
      </div>
      <svg id="chart-net" class="chart" viewBox="0 0 640 250" role="img" aria-label="Net calories and rolling sum"></svg>
      <div class="controls">
        <div class="tabs" role="tablist">
          {{WINDOW_BUTTONS}}
        </div>
        <div class="slider">
          <label for="span" id="span-label">Showing all days</label>
          <input type="range" id="span" min="1" max="1" value="1" />
        </div>
        <button class="btn-refresh" id="refresh" type="button">Refresh data</button>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const dailyChartEl = document.getElementById('chart-daily');
    const netChartEl = document.getElementById('chart-net');
    const statusEl = document.getElementById('status');
    const spanEl = document.getElementById('span');
    const spanLabelEl = document.getElementById('span-label');
    const rollingKeyEl = document.getElementById('rolling-key');
    const metricDaysEl = document.getElementById('metric-days');
    const metricInEl = document.getElementById('metric-in');
    const metricNetEl = document.getElementById('metric-net');
    const metricWindowEl = document.getElementById('metric-window');
    const refreshEl = document.getElementById('refresh');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let allRows = [];
    let windowSize = {{DEFAULT_WINDOW}};
    let span = 0;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const rollingNet = (rows, w) => {
      const out = new Array(rows.length).fill(null);
      let sum = 0;
      for (let i = 0; i < rows.length; i += 1) {
        sum += rows[i].net;
        if (i >= w) {
          sum -= rows[i - w].net;
        }
        if (i + 1 >= w) {
          out[i] = sum;
        }
      }
      return out;
    };

    const formatValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const bounds = (values) => {
      const present = values.filter((value) => value !== null && value !== undefined);
      if (!present.length) {
        return { min: -1, max: 1 };
      }
      let min = Math.min(0, ...present);
      let max = Math.max(0, ...present);
      if (min === max) {
        min -= 1;
        max += 1;
      }
      return { min, max };
    };

    // Builds a path, breaking at null values so the rolling trace starts
    // where the window is first full.
    const pathFor = (values, x, y) => {
      let path = '';
      let pen = false;
      values.forEach((value, index) => {
        if (value === null || value === undefined) {
          pen = false;
          return;
        }
        path += `${pen ? 'L' : 'M'} ${x(index).toFixed(2)} ${y(value).toFixed(2)} `;
        pen = true;
      });
      return path.trim();
    };

    const drawChart = (el, labels, leftSeries, rightSeries) => {
      if (!labels.length) {
        el.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const width = 640;
      const height = 250;
      const paddingX = 52;
      const paddingY = 32;
      const top = 18;

      const left = bounds(leftSeries.flatMap((series) => series.values));
      const leftRange = left.max - left.min;
      const xStep = labels.length > 1 ? (width - paddingX * 2) / (labels.length - 1) : 0;
      const x = (index) => paddingX + index * xStep;
      const yLeft = (value) => height - paddingY - ((value - left.min) * (height - top - paddingY)) / leftRange;

      const ticks = 4;
      let parts = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = left.min + (leftRange * i) / ticks;
        const yPos = yLeft(value);
        parts += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        parts += `<text class="chart-label" x="${paddingX - 8}" y="${yPos + 4}" text-anchor="end">${formatValue(value)}</text>`;
      }

      if (left.min < 0 && left.max > 0) {
        parts += `<line class="chart-zero" x1="${paddingX}" y1="${yLeft(0)}" x2="${width - paddingX}" y2="${yLeft(0)}" />`;
      }

      const labelEvery = Math.max(1, Math.ceil(labels.length / 8));
      labels.forEach((label, index) => {
        if (index % labelEvery !== 0 && index !== labels.length - 1) {
          return;
        }
        parts += `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${label.slice(5)}</text>`;
      });

      leftSeries.forEach((series) => {
        parts += `<path class="line ${series.cls}" d="${pathFor(series.values, x, yLeft)}" />`;
      });

      if (rightSeries) {
        const right = bounds(rightSeries.values);
        const rightRange = right.max - right.min;
        const yRight = (value) => height - paddingY - ((value - right.min) * (height - top - paddingY)) / rightRange;
        for (let i = 0; i <= ticks; i += 1) {
          const value = right.min + (rightRange * i) / ticks;
          parts += `<text class="chart-label right" x="${width - paddingX + 8}" y="${yRight(value) + 4}" text-anchor="start">${formatValue(value)}</text>`;
        }
        parts += `<path class="line ${rightSeries.cls}" d="${pathFor(rightSeries.values, x, yRight)}" />`;
      }

      el.innerHTML = parts;
    };

    const renderDaily = (visible) => {
      drawChart(
        dailyChartEl,
        visible.map((row) => row.date),
        [
          { values: visible.map((row) => row.calories_in), cls: 'line-in' },
          { values: visible.map((row) => row.calories_out), cls: 'line-out' }
        ],
        null
      );
    };

    const renderNet = () => {
      const rolling = rollingNet(allRows, windowSize);
      const start = allRows.length - span;
      const visible = allRows.slice(start);
      drawChart(
        netChartEl,
        visible.map((row) => row.date),
        [{ values: visible.map((row) => row.net), cls: 'line-net' }],
        { values: rolling.slice(start), cls: 'line-roll' }
      );
      rollingKeyEl.textContent = `${windowSize}-day rolling sum`;
      metricWindowEl.textContent = `${windowSize} days`;
    };

    const renderAll = () => {
      const visible = allRows.slice(allRows.length - span);
      renderDaily(visible);
      renderNet();

      metricDaysEl.textContent = visible.length;
      if (visible.length) {
        const totalIn = visible.reduce((acc, row) => acc + row.calories_in, 0);
        const totalNet = visible.reduce((acc, row) => acc + row.net, 0);
        metricInEl.textContent = formatValue(totalIn / visible.length);
        metricNetEl.textContent = formatValue(totalNet / visible.length);
      } else {
        metricInEl.textContent = '--';
        metricNetEl.textContent = '--';
      }
      spanLabelEl.textContent = span === allRows.length
        ? `Showing all ${allRows.length} days`
        : `Showing last ${span} days`;
    };

    const loadDaily = async () => {
      const res = await fetch('/api/daily');
      if (!res.ok) {
        throw new Error('Unable to load the daily report');
      }
      const report = await res.json();
      allRows = report.rows;
      windowSize = windowSize || report.window;
      span = allRows.length;
      spanEl.min = Math.min(7, Math.max(1, allRows.length));
      spanEl.max = Math.max(1, allRows.length);
      spanEl.value = Math.max(1, allRows.length);
      spanEl.disabled = allRows.length < 2;
      renderAll();
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        windowSize = Number(button.dataset.window);
        tabs.forEach((tab) => {
          const isActive = tab === button;
          tab.classList.toggle('active', isActive);
          tab.setAttribute('aria-selected', String(isActive));
        });
        renderNet();
      });
    });

    spanEl.addEventListener('input', () => {
      span = Number(spanEl.value);
      renderAll();
    });

    refreshEl.addEventListener('click', async () => {
      setStatus('Refreshing...', '');
      try {
        const res = await fetch('/api/refresh', { method: 'POST' });
        if (!res.ok) {
          throw new Error(await res.text() || 'Refresh failed');
        }
        await loadDaily();
        setStatus('Updated', 'ok');
        setTimeout(() => setStatus('', ''), 1500);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    loadDaily().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
