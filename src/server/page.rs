//! Embedded control page for the identify utility.
//!
//! Single static HTML document served at `/`. It talks to the JSON API
//! only, so anything here can also be done with curl.

pub(crate) const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>pixa - LED Matrix Identify</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif;
            background: #1a1a1a;
            color: #e0e0e0;
            padding: 30px 20px;
            line-height: 1.6;
        }
        .container { max-width: 560px; margin: 0 auto; }
        h1 { color: #00aaff; margin-bottom: 8px; font-size: 1.6em; }
        p.hint { color: #b0b0b0; margin-bottom: 24px; font-size: 0.9em; }
        label {
            display: block;
            color: #b0b0b0;
            margin-bottom: 8px;
            font-size: 0.9em;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }
        select {
            width: 100%;
            background: #252525;
            border: 1px solid #505050;
            color: #e0e0e0;
            padding: 10px 12px;
            border-radius: 4px;
            font-size: 1em;
            margin-bottom: 16px;
        }
        button {
            background: #00aaff;
            color: white;
            border: none;
            padding: 10px 24px;
            border-radius: 4px;
            font-size: 1em;
            cursor: pointer;
        }
        button:disabled { background: #555555; cursor: not-allowed; opacity: 0.5; }
        #status { margin-top: 20px; min-height: 1.6em; }
        #status.busy { color: #00aaff; }
        #status.ok { color: #44cc66; }
        #status.failed { color: #ff4444; }
    </style>
</head>
<body>
    <div class="container">
        <h1>LED Matrix Identify</h1>
        <p class="hint">Pick a controller and make it blink to find out which panel is which.</p>
        <label for="controller">Controller</label>
        <select id="controller"></select>
        <button id="identify">Identify</button>
        <div id="status">Idle</div>
    </div>
    <script>
        const select = document.getElementById('controller');
        const button = document.getElementById('identify');
        const status = document.getElementById('status');

        async function loadControllers() {
            const res = await fetch('/api/controllers');
            const controllers = await res.json();
            select.innerHTML = '';
            for (const c of controllers) {
                const opt = document.createElement('option');
                opt.value = c.name;
                opt.textContent = c.name + ' - ' + c.description;
                select.appendChild(opt);
            }
            if (controllers.length > 1) {
                const all = document.createElement('option');
                all.value = 'All';
                all.textContent = 'All';
                select.appendChild(all);
            }
            if (controllers.length === 0) {
                status.textContent = 'No controllers attached';
                status.className = 'failed';
                button.disabled = true;
            }
        }

        async function poll() {
            const res = await fetch('/api/status');
            const st = await res.json();
            button.disabled = st.busy;
            select.disabled = st.busy;
            if (st.busy) {
                status.textContent = 'Identifying... ' + st.finished + '/' + st.total;
                status.className = 'busy';
            } else if (st.total > 0) {
                if (st.failures.length > 0) {
                    status.textContent = 'Failed: ' + st.failures
                        .map(f => f.controller + ' (' + f.error + ')').join(', ');
                    status.className = 'failed';
                } else {
                    status.textContent = 'Done, ' + st.total + ' identified';
                    status.className = 'ok';
                }
            }
        }

        button.addEventListener('click', async () => {
            const res = await fetch('/api/identify', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ selection: select.value })
            });
            if (!res.ok) {
                const body = await res.json();
                status.textContent = body.error || 'Request failed';
                status.className = 'failed';
                return;
            }
            await poll();
        });

        loadControllers();
        poll();
        setInterval(poll, 300);
    </script>
</body>
</html>
"#;
