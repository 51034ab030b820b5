//! Global CSS styles for the coming-soon page.
//!
//! Black background, white text, red call to action.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --bg: #000000;
  --surface: #111111;
  --border: #3a3a3a;

  --text-primary: #ffffff;
  --text-secondary: rgba(255, 255, 255, 0.7);
  --text-muted: rgba(255, 255, 255, 0.45);

  --accent: #e50914;
  --accent-hover: #b20710;
  --danger: #ff4d4f;

  --font-sans: 'Inter', 'Helvetica Neue', Arial, sans-serif;
  --radius: 8px;
}

/* === Base === */
* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html, body {
  background: var(--bg);
  color: var(--text-primary);
  font-family: var(--font-sans);
  min-height: 100vh;
}

/* === Pages === */
.coming-soon,
.launch-info {
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  gap: 1.25rem;
  min-height: 100vh;
  padding: 2rem;
  text-align: center;
}

.site-header {
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 1rem 1.5rem;
}

.brand {
  display: flex;
  align-items: center;
  gap: 0.75rem;
}

.brand-mark {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  width: 3rem;
  height: 3rem;
  border-radius: 50%;
  background: var(--accent);
  font-weight: 700;
}

.brand-name {
  font-size: 1.25rem;
  letter-spacing: 0.08em;
  text-transform: uppercase;
}

.headline {
  font-size: 3rem;
  font-weight: 800;
}

.tagline {
  color: var(--text-secondary);
  max-width: 28rem;
}

.launch-points {
  list-style: none;
  color: var(--text-secondary);
  line-height: 2;
}

.launch-note {
  color: var(--text-muted);
  max-width: 28rem;
}

/* === Status === */
.status-message {
  min-height: 1.5rem;
  color: var(--text-primary);
}

.status-message.error {
  color: var(--danger);
}

.status-message.pending {
  color: var(--text-muted);
  font-style: italic;
}

.loading-notice {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  color: var(--text-muted);
}

.status-dot {
  width: 0.5rem;
  height: 0.5rem;
  border-radius: 50%;
  background: var(--accent);
  animation: pulse 1.2s ease-in-out infinite;
}

@keyframes pulse {
  0%, 100% { opacity: 0.3; }
  50% { opacity: 1; }
}

/* === Form === */
.signup-form {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
  width: 100%;
  max-width: 22rem;
}

.input-field {
  width: 100%;
  padding: 0.75rem 1rem;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--text-primary);
  font-size: 1rem;
}

.input-field::placeholder {
  color: var(--text-muted);
}

.input-field:focus {
  outline: none;
  border-color: var(--accent);
}

.input-field:disabled {
  opacity: 0.6;
}

/* === Buttons === */
.btn-notify {
  width: 100%;
  padding: 0.85rem 1rem;
  background: var(--accent);
  border: none;
  border-radius: var(--radius);
  color: var(--text-primary);
  font-size: 1rem;
  font-weight: 700;
  cursor: pointer;
  transition: background 0.15s ease;
}

.btn-notify:hover:not(:disabled) {
  background: var(--accent-hover);
}

.btn-notify:disabled {
  opacity: 0.6;
  cursor: not-allowed;
}

.btn-link {
  background: none;
  border: none;
  color: var(--text-secondary);
  text-decoration: underline;
  cursor: pointer;
  font-size: 0.9rem;
}

.btn-link:hover {
  color: var(--text-primary);
}
"#;
