//! Baseline stylesheet and script inlined into every export.

/// Theme variables, layout and per-kind styles
pub const BASE_CSS: &str = r#"*, *::before, *::after { box-sizing: border-box; }
:root { --pk-accent: #6366f1; --pk-radius: 14px; --pk-max: 1120px; }
[data-theme="dark"] { --pk-bg: #0b0b12; --pk-surface: #151522; --pk-text: #f4f4f8; --pk-muted: #a0a0b8; --pk-border: #26263a; }
[data-theme="light"] { --pk-bg: #ffffff; --pk-surface: #f6f7fb; --pk-text: #111827; --pk-muted: #5b6474; --pk-border: #e4e7ef; }
body { margin: 0; background: var(--pk-bg); color: var(--pk-text); font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif; line-height: 1.6; }
a { color: inherit; text-decoration: none; }
img { max-width: 100%; display: block; }
.pk-container { width: 100%; max-width: var(--pk-max); margin: 0 auto; padding: 0 1.5rem; }
.pk-section { position: relative; padding: 5rem 0; overflow: hidden; }
.pk-section-header { text-align: center; margin-bottom: 3rem; }
.pk-title { margin: 0 0 1rem; font-size: clamp(2rem, 4vw, 3rem); line-height: 1.15; }
.pk-subtitle { margin: 0 auto; max-width: 640px; color: var(--pk-muted); font-size: 1.125rem; }
.pk-button { display: inline-block; padding: 0.75rem 1.5rem; border-radius: 999px; font-weight: 600; border: 1px solid transparent; }
.pk-button-primary { background: var(--pk-accent); color: #fff; }
.pk-button-secondary { border-color: var(--pk-border); }
.pk-actions { display: flex; gap: 1rem; flex-wrap: wrap; margin-top: 2rem; }
.pk-grid { display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); }
.pk-card { background: var(--pk-surface); border: 1px solid var(--pk-border); border-radius: var(--pk-radius); padding: 1.75rem; }
.pk-navbar { padding: 1rem 0; border-bottom: 1px solid var(--pk-border); }
.pk-nav { display: flex; align-items: center; gap: 2rem; }
.pk-brand { font-weight: 700; font-size: 1.25rem; }
.pk-nav-links { display: flex; gap: 1.5rem; list-style: none; margin: 0 0 0 auto; padding: 0; }
.pk-nav-link { color: var(--pk-muted); }
.pk-nav-toggle { display: none; background: none; border: 0; color: inherit; font-size: 1.5rem; }
@media (max-width: 720px) {
  .pk-nav-toggle { display: block; margin-left: auto; }
  .pk-nav-links { display: none; }
  .pk-nav--open .pk-nav-links { display: flex; flex-direction: column; width: 100%; }
  .pk-nav { flex-wrap: wrap; }
}
.pk-hero { padding: 8rem 0; text-align: center; }
.pk-hero-content { position: relative; z-index: 1; }
.pk-hero .pk-actions { justify-content: center; }
.pk-hero-bg { position: absolute; inset: 0; width: 100%; height: 100%; object-fit: cover; }
.pk-hero-overlay { position: absolute; inset: 0; background: linear-gradient(180deg, rgba(0,0,0,0.35), rgba(0,0,0,0.7)); }
.pk-orbs { position: absolute; inset: 0; pointer-events: none; }
.pk-orb { position: absolute; width: 420px; height: 420px; border-radius: 50%; filter: blur(90px); opacity: 0.45; background: var(--pk-accent); }
.pk-orb-1 { top: -140px; left: -120px; }
.pk-orb-2 { bottom: -160px; right: -120px; opacity: 0.3; }
.pk-badge { display: inline-block; margin-bottom: 1.5rem; padding: 0.25rem 0.9rem; border-radius: 999px; border: 1px solid var(--pk-border); color: var(--pk-muted); font-size: 0.875rem; }
.pk-icon { display: inline-flex; width: 44px; height: 44px; padding: 10px; border-radius: 12px; color: var(--pk-accent); background: var(--pk-bg); }
.pk-feature h3, .pk-plan-name { margin: 1rem 0 0.5rem; }
.pk-feature p { margin: 0; color: var(--pk-muted); }
.pk-plan--highlighted { border-color: var(--pk-accent); box-shadow: 0 0 0 1px var(--pk-accent); }
.pk-plan-price { margin: 1rem 0; }
.pk-price { font-size: 2.5rem; font-weight: 700; }
.pk-period { color: var(--pk-muted); }
.pk-plan-features { list-style: none; padding: 0; margin: 0 0 1.5rem; color: var(--pk-muted); }
.pk-testimonial { margin: 0; }
.pk-testimonial blockquote { margin: 0 0 1.25rem; font-size: 1.05rem; }
.pk-author { display: flex; align-items: center; gap: 0.75rem; }
.pk-avatar { width: 40px; height: 40px; border-radius: 50%; object-fit: cover; }
.pk-initials { display: inline-flex; align-items: center; justify-content: center; background: var(--pk-accent); color: #fff; font-weight: 700; }
.pk-role { display: block; color: var(--pk-muted); font-size: 0.875rem; }
.pk-stats-grid { text-align: center; }
.pk-stat-value { display: block; font-size: 2.5rem; font-weight: 700; color: var(--pk-accent); }
.pk-stat-label { color: var(--pk-muted); }
.pk-faq-list { max-width: 760px; margin: 0 auto; }
.pk-faq-item { border-bottom: 1px solid var(--pk-border); }
.pk-faq-question { width: 100%; padding: 1.25rem 0; background: none; border: 0; color: inherit; font: inherit; font-weight: 600; text-align: left; cursor: pointer; }
.pk-faq-answer { display: none; color: var(--pk-muted); }
.pk-faq-item--open .pk-faq-answer { display: block; }
.pk-cta-box { text-align: center; padding: 4rem 1.5rem; border-radius: var(--pk-radius); background: var(--pk-surface); border: 1px solid var(--pk-border); }
.pk-cta-box .pk-actions { justify-content: center; }
.pk-align-center { text-align: center; }
.pk-content p { max-width: 720px; }
.pk-align-center p { margin-left: auto; margin-right: auto; }
.pk-content-image { margin-top: 2rem; border-radius: var(--pk-radius); }
.pk-footer { padding: 3rem 0; border-top: 1px solid var(--pk-border); }
.pk-footer-inner { display: flex; flex-wrap: wrap; gap: 2rem; align-items: flex-start; justify-content: space-between; }
.pk-tagline { margin: 0.5rem 0 0; color: var(--pk-muted); }
.pk-footer-links { display: flex; gap: 1.5rem; list-style: none; margin: 0; padding: 0; color: var(--pk-muted); }
.pk-copyright { width: 100%; margin: 0; color: var(--pk-muted); font-size: 0.875rem; }"#;

/// Mobile navigation toggle and FAQ expanders
pub const SCRIPT: &str = r#"document.querySelectorAll('.pk-nav-toggle').forEach(function (button) {
  button.addEventListener('click', function () {
    button.closest('.pk-nav').classList.toggle('pk-nav--open');
  });
});
document.querySelectorAll('.pk-faq-question').forEach(function (question) {
  question.addEventListener('click', function () {
    question.parentElement.classList.toggle('pk-faq-item--open');
  });
});"#;
