// Copyright 2023 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! The classic linked list demonstration: front-insert the values 0 to 9,
//! print the list, delete the values 3, 6, and 9, and print it again.

use std::pin::Pin;

use lk_list::list::{LkBoxingListHead, LkList, LkListEntry};
use lk_list::LkListElement;
use moveit::moveit;

#[derive(LkList)]
enum ValueList {}

#[derive(Default, LkListElement)]
#[repr(C)]
struct Value {
    data: i32,
    #[boxed]
    entry: LkListEntry<Self, ValueList>,
}

fn print(list: Pin<&LkBoxingListHead<Value, ValueList>>) {
    for value in list.iter() {
        print!("{} -> ", value.data);
    }
    println!("NULL");
}

fn main() {
    moveit! {
        let mut list = LkBoxingListHead::<Value, ValueList>::new();
    }

    for i in 0..10 {
        list.as_mut().push_front(Value {
            data: i,
            ..Default::default()
        });
    }

    print(list.as_ref());

    for unwanted in [3, 6, 9] {
        list.as_mut().retain(|value| value.data != unwanted);
    }

    print(list.as_ref());
}
