use super::*;
use crate::renderer::svg_renderer::SvgRenderer;

fn frame(x: f64) -> Rc<dyn Boundable> {
    Rc::new(Rect::new(x, 0.0, x + 10.0, 10.0))
}

#[test]
fn stack_returns_innermost_first() {
    let mut s = BoundableStack::new();
    for i in 0..3 {
        s.push(frame(f64::from(i)));
    }
    assert_eq!(s.len(), 3);
    assert_eq!(s.current().unwrap().bounds().x0, 2.0);
    assert_eq!(s.pop().unwrap().bounds().x0, 2.0);
    assert_eq!(s.current().unwrap().bounds().x0, 1.0);
}

#[test]
fn empty_stack_reports_empty_context() {
    let mut s = BoundableStack::new();
    assert!(s.is_empty());
    assert!(matches!(s.current(), Err(RenderError::EmptyContext(_))));
    assert!(matches!(s.pop(), Err(RenderError::EmptyContext(_))));
}

#[test]
fn rect_has_no_path_but_graphics_path_does() {
    let r = Rect::new(0.0, 0.0, 4.0, 4.0);
    assert!(Boundable::path(&r).is_none());

    let p = GraphicsPath::rect(r);
    assert_eq!(Boundable::bounds(&p), r);
    assert!(Boundable::path(&p).is_some());
}

#[test]
fn scope_pops_on_drop() {
    let mut r = SvgRenderer::from_nothing().unwrap();
    {
        let scope = BoundableScope::new(&mut r, frame(5.0));
        assert_eq!(scope.boundable_depth(), 1);
        assert_eq!(scope.current_boundable().unwrap().bounds().x0, 5.0);
    }
    assert_eq!(r.boundable_depth(), 0);
}

#[test]
fn scope_unwinds_entries_left_by_the_subtree() {
    let mut r = SvgRenderer::from_nothing().unwrap();
    r.push_boundable(frame(0.0));
    {
        let mut scope = BoundableScope::new(&mut r, frame(1.0));
        scope.push_boundable(frame(2.0));
        scope.push_boundable(frame(3.0));
    }
    assert_eq!(r.boundable_depth(), 1);
    assert_eq!(r.current_boundable().unwrap().bounds().x0, 0.0);
}

#[test]
fn scope_tolerates_subtree_popping_its_entry() {
    let mut r = SvgRenderer::from_nothing().unwrap();
    r.push_boundable(frame(0.0));
    {
        let mut scope = BoundableScope::new(&mut r, frame(1.0));
        scope.pop_boundable().unwrap();
    }
    assert_eq!(r.boundable_depth(), 1);
}

#[derive(Clone, Default)]
struct LogSink(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn scope_warns_when_unwinding_unbalanced_pushes() {
    let sink = LogSink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut r = SvgRenderer::from_nothing().unwrap();
        {
            let mut scope = BoundableScope::new(&mut r, frame(0.0));
            scope.push_boundable(frame(1.0));
            scope.push_boundable(frame(2.0));
        }
        assert_eq!(r.boundable_depth(), 0);
    });

    let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("leaked=2"), "{logs}");
}

#[test]
fn balanced_scope_does_not_warn() {
    let sink = LogSink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut r = SvgRenderer::from_nothing().unwrap();
        let _scope = BoundableScope::new(&mut r, frame(0.0));
    });

    assert!(sink.0.lock().unwrap().is_empty());
}
