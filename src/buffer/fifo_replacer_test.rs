use crate::buffer::fifo_replacer::FifoReplacer;
use crate::buffer::replace::Replacer;
use crate::storage::page::Page;

#[test]
fn test_fifo_replacer() {
    let fifo = FifoReplacer;
    let mut frames = vec![
        Page::new(1, 0, 0),
        Page::new(2, 1, 1),
        Page::new(3, 2, 2),
        Page::new(4, 3, 3),
    ];

    // hits never change the arrival order
    fifo.record_access(&mut frames[0], 10);
    assert_eq!(frames[0].get_last_access(), 0);
    assert_eq!(fifo.victim(&frames), Some(0));

    assert_eq!(fifo.replace(&mut frames, 0, 5, 11), 3);
    let ids: Vec<_> = frames.iter().map(Page::get_id).collect();
    assert_eq!(ids, vec![2, 3, 4, 5]);
    for (index, page) in frames.iter().enumerate() {
        assert_eq!(page.get_slot(), index);
    }

    assert_eq!(fifo.victim(&frames), Some(0));
    assert_eq!(frames[0].get_id(), 2);
    assert_eq!(fifo.victim(&[]), None);
}
